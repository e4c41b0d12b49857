// Purpose: the control plane. Controller numbers, the parameter store, and
// the interpreter that turns commands into state changes.

pub mod cc;
pub mod interpreter;
pub mod params;

pub use interpreter::{Interpreter, Targets};
pub use params::{InstrumentMode, ParameterSet};
