//! Instruction pipeline implementation.
//!
//! This module contains the implementation of the five-stage instruction pipeline.
//! It includes the following components:
//! 1. **Forwarding:** Execute results held until writeback commits them.
//! 2. **Latches:** Named records carried between stages in cycle-tagged queues.
//! 3. **Stages:** Implementation of Fetch, Decode, Execute, Memory, and Writeback stages.

/// Generation-tagged forwarding table.
pub mod forwarding;

/// Inter-stage pipeline latches.
pub mod latches;

/// Pipeline stage implementations (fetch, decode, execute, memory, writeback).
pub mod stages;
