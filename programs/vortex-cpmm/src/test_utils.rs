use anchor_lang::prelude::*;

use crate::errors::AmmError;

/// Assert that `result` failed with the given program error
pub fn assert_amm_err<T: std::fmt::Debug>(result: Result<T>, expected: AmmError) {
    match result {
        Err(anchor_lang::error::Error::AnchorError(e)) => {
            assert_eq!(
                e.error_code_number,
                u32::from(expected),
                "expected {:?}, got {}",
                expected,
                e.error_name
            );
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
