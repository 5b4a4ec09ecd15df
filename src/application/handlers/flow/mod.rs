//! Question flow handlers.

mod answer_flow_engine;

pub use answer_flow_engine::AnswerFlowEngine;
