//! Contract checks for programming errors.
//!
//! Debug builds halt on a violated contract; release builds degrade to a
//! safe early return. Use for mode mismatches and missing capabilities,
//! never for legal-but-degenerate numeric input.

macro_rules! contract_check {
    ($cond:expr, $msg:expr) => {
        if !($cond) {
            debug_assert!(false, $msg);
            return;
        }
    };
    ($cond:expr, $msg:expr, $ret:expr) => {
        if !($cond) {
            debug_assert!(false, $msg);
            return $ret;
        }
    };
}

pub(crate) use contract_check;
