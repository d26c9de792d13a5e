pub mod priority_queue;

pub use priority_queue::EmptyQueueError;
pub use priority_queue::PriorityQueue;
