pub mod aggregator;
pub mod health;
pub mod resolver;

pub use aggregator::{
    AggregateOptions,
    Aggregator,
};
pub use health::classify;
pub use resolver::ResourceResolver;
