pub mod engine_outputs;
