mod descriptors;
mod nesting;
mod properties;
mod scenarios;
