//! Names with built-in meaning to the runtime.

pub const SELF_STR: &str = "self";

pub const INIT_METHOD: &str = "__init__";
pub const STR_METHOD: &str = "__str__";
pub const ADD_METHOD: &str = "__add__";
pub const EQ_METHOD: &str = "__eq__";
pub const LT_METHOD: &str = "__lt__";
