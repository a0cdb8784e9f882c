//! Translation of exchange-qualified security codes into EastMoney F10 codes.

use peratio_core::PeRatioError;

/// Listing venue of an A-share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exchange {
    /// Shanghai Stock Exchange.
    Shanghai,
    /// Shenzhen Stock Exchange.
    Shenzhen,
}

impl Exchange {
    /// Suffix EastMoney appends to the six-digit code.
    #[must_use]
    pub const fn provider_tag(self) -> &'static str {
        match self {
            Self::Shanghai => "01",
            Self::Shenzhen => "02",
        }
    }

    fn from_mnemonic(s: &str) -> Option<Self> {
        match s {
            "SH" | "SS" => Some(Self::Shanghai),
            "SZ" => Some(Self::Shenzhen),
            _ => None,
        }
    }

    fn infer(digits: &str) -> Option<Self> {
        match digits.as_bytes().first()? {
            b'6' | b'9' => Some(Self::Shanghai),
            b'0' | b'2' | b'3' => Some(Self::Shenzhen),
            _ => None,
        }
    }
}

fn is_six_digits(s: &str) -> bool {
    s.len() == 6 && s.bytes().all(|b| b.is_ascii_digit())
}

/// Split a security code into its six digits and exchange.
///
/// Accepts `600519.SH`, `SH600519` (any case) or a bare six-digit code whose
/// exchange is inferred from the leading digit.
///
/// # Errors
/// Returns `InvalidArg` when the code has no recognizable shape or exchange.
pub fn parse_security_code(security_code: &str) -> Result<(String, Exchange), PeRatioError> {
    let code = security_code.trim().to_ascii_uppercase();
    let invalid =
        || PeRatioError::InvalidArg(format!("unrecognized security code: {security_code:?}"));

    let (digits, exchange) = if let Some((digits, suffix)) = code.split_once('.') {
        (digits, Exchange::from_mnemonic(suffix))
    } else if code.len() == 8 && code.is_char_boundary(2) {
        let (prefix, digits) = code.split_at(2);
        (digits, Exchange::from_mnemonic(prefix))
    } else {
        (code.as_str(), Exchange::infer(&code))
    };

    if !is_six_digits(digits) {
        return Err(invalid());
    }
    let exchange = exchange.ok_or_else(invalid)?;
    Ok((digits.to_string(), exchange))
}

/// Provider code for `security_code`, e.g. `600519.SH` → `60051901`.
///
/// # Errors
/// Returns `InvalidArg` when the code cannot be translated.
pub fn to_provider_code(security_code: &str) -> Result<String, PeRatioError> {
    let (digits, exchange) = parse_security_code(security_code)?;
    Ok(format!("{digits}{}", exchange.provider_tag()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_and_prefixed_forms() {
        assert_eq!(to_provider_code("600519.SH").unwrap(), "60051901");
        assert_eq!(to_provider_code("600519.ss").unwrap(), "60051901");
        assert_eq!(to_provider_code("000001.SZ").unwrap(), "00000102");
        assert_eq!(to_provider_code("sz300750").unwrap(), "30075002");
        assert_eq!(to_provider_code(" SH601318 ").unwrap(), "60131801");
    }

    #[test]
    fn bare_codes_infer_exchange() {
        assert_eq!(to_provider_code("600036").unwrap(), "60003601");
        assert_eq!(to_provider_code("002594").unwrap(), "00259402");
        assert_eq!(to_provider_code("900901").unwrap(), "90090101");
    }

    #[test]
    fn rejects_unknown_shapes() {
        for bad in ["", "AAPL", "600519.HK", "60051", "6005190", "800001", "BJ430047", "六00519"] {
            assert!(
                matches!(to_provider_code(bad), Err(PeRatioError::InvalidArg(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
