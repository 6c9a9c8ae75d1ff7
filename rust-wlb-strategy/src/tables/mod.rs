//! In-memory host tables the strategy operates against.
//!
//! The forwarder owns these; the strategy reads them and attaches its own
//! state to PIT and measurement entries through the typed slots.

pub mod face;
pub mod fib;
pub mod measurements;
pub mod pit;
pub mod strategy_info;
