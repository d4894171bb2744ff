pub mod dispatcher;
pub mod room_bot;

pub use dispatcher::EventDispatcher;
pub use room_bot::RoomBot;
