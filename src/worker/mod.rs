mod pool;
mod task;

pub use pool::WorkerPool;
pub use task::RenderTask;
