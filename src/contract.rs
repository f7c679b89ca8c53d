use std::fmt::Debug;

use log::warn;

use crate::error::ContractError;

pub type ContractResult<T> = Result<T, ContractError>;

pub fn precondition(cond: bool, message: &str, value: impl Debug) -> ContractResult<()> {
    if cond {
        return Ok(());
    }
    Err(ContractError::Precondition {
        message: message.to_string(),
        value: format!("{:?}", value),
    })
}

pub fn postcondition(cond: bool, message: &str, value: impl Debug) -> ContractResult<()> {
    if cond {
        return Ok(());
    }
    let value = format!("{:?}", value);
    warn!("postcondition failed: {} ({})", message, value);
    Err(ContractError::Postcondition {
        message: message.to_string(),
        value,
    })
}

pub fn invariant(cond: bool, message: &str, value: impl Debug) -> ContractResult<()> {
    if cond {
        return Ok(());
    }
    let value = format!("{:?}", value);
    warn!("invariant failed: {} ({})", message, value);
    Err(ContractError::Invariant {
        message: message.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FaultKind;

    #[test]
    fn holding_conditions_pass() {
        assert!(precondition(true, "unused", 0).is_ok());
        assert!(postcondition(true, "unused", 0).is_ok());
        assert!(invariant(true, "unused", 0).is_ok());
    }

    #[test]
    fn each_check_raises_its_own_kind() {
        let pre = precondition(false, "index out of range", 7usize).unwrap_err();
        let post = postcondition(false, "count changed", 2usize).unwrap_err();
        let inv = invariant(false, "delimiter invalid", '\\').unwrap_err();

        assert_eq!(pre.kind(), FaultKind::Precondition);
        assert_eq!(post.kind(), FaultKind::Postcondition);
        assert_eq!(inv.kind(), FaultKind::Invariant);
    }

    #[test]
    fn offending_value_is_debug_rendered() {
        let err = precondition(false, "bad component", "a.b").unwrap_err();
        assert_eq!(err.value(), "\"a.b\"");
        assert_eq!(err.message(), "bad component");
    }
}
