pub mod turn_dispatcher;

pub use turn_dispatcher::TurnDispatcher;
