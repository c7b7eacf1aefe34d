pub mod bounded_heap;
pub mod priority_queue;

pub use bounded_heap::BoundedHeap;
pub use priority_queue::MinHeap;
