mod segment_chain;

pub use segment_chain::OffsetChain;
