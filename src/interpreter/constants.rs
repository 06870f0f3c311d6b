// Constants for the tape interpreter

/// Number of physical cells on the tape
pub const TAPE_LEN: usize = 256;

/// Size of the address register's range; addresses wrap modulo this value
/// and alias into the tape modulo [`TAPE_LEN`]
pub const ADDRESS_SPACE: usize = 4096;

/// Instructions executed before a run is treated as overflowed
pub const DEFAULT_STEP_BUDGET: u64 = 200_000_000;

/// Maximum number of debug snapshots retained per run
pub const SNAPSHOT_CAPACITY: usize = 512;

/// Steps between two cancellation checks
pub const DEFAULT_YIELD_INTERVAL: u64 = 20;
