use slabgen_blocks::Identifier;
use slabgen_blocks::types::BlockDescriptor;

/// The game's block registry, as seen from variant creation.
pub trait BlockHost: Send {
    fn register_block(&mut self, id: &Identifier, descriptor: &BlockDescriptor);
}

/// Host that keeps every registration in order.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub registered: Vec<(Identifier, BlockDescriptor)>,
}

impl BlockHost for RecordingHost {
    fn register_block(&mut self, id: &Identifier, descriptor: &BlockDescriptor) {
        self.registered.push((id.clone(), descriptor.clone()));
    }
}
