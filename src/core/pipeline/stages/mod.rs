//! Pipeline stage implementations.
//!
//! One free function per stage, each consuming its input latch and
//! producing into its output latch. The orchestrator runs them in reverse
//! order (writeback first) so that every stage observes its predecessor's
//! start-of-tick output, realizing the logically-parallel tick contract
//! with single-slot latches.

/// Instruction decode stage.
pub mod decode;
/// Execute stage.
pub mod execute;
/// Instruction fetch stage.
pub mod fetch;
/// Memory access stage.
pub mod memory;
/// Writeback stage.
pub mod writeback;

pub use decode::decode_stage;
pub use execute::execute_stage;
pub use fetch::fetch_stage;
pub use memory::memory_stage;
pub use writeback::writeback_stage;
