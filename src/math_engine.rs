use crate::error::{DrillError, DrillResult};

/// Equity a caller needs to break even: `bet / (pot + 2 * bet)`.
pub fn pot_odds(pot: f64, bet: f64) -> DrillResult<f64> {
    if pot <= 0.0 || bet <= 0.0 {
        return Err(DrillError::InvalidValue(
            "Pot and bet must be positive".to_string(),
        ));
    }
    Ok(call_breakeven(pot, bet))
}

/// Fold frequency a bluff needs to break even: `bet / (pot + bet)`.
pub fn fold_equity_breakeven(pot: f64, bet: f64) -> DrillResult<f64> {
    if pot <= 0.0 || bet <= 0.0 {
        return Err(DrillError::InvalidValue(
            "Pot and bet must be positive".to_string(),
        ));
    }
    Ok(bluff_breakeven(pot, bet))
}

pub fn call_breakeven(pot: f64, bet: f64) -> f64 {
    bet / (pot + bet + bet)
}

pub fn bluff_breakeven(pot: f64, bet: f64) -> f64 {
    bet / (pot + bet)
}

pub fn call_share(pot: f64, bet: f64) -> f64 {
    pot / (pot + bet + bet)
}

pub fn pot_share(pot: f64, bet: f64) -> f64 {
    pot / (pot + bet)
}

pub fn bet_to_pot(pot: f64, bet: f64) -> f64 {
    bet / pot.max(1.0)
}

pub fn call_ev(equity: f64, pot: f64, bet: f64) -> f64 {
    let win_amount = pot + bet;
    equity * win_amount - (1.0 - equity) * bet
}

/// EV of a pure bluff that risks `bet` to win `pot`.
pub fn bluff_ev(fold_pct: f64, pot: f64, bet: f64) -> f64 {
    fold_pct * pot - (1.0 - fold_pct) * bet
}

pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Percentage label with one decimal, rounded on the tenth of a percent.
pub fn to_pct_label(x: f64) -> String {
    let v = (x * 1000.0).round() / 10.0;
    format!("{:.1}%", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_label_rounding() {
        assert_eq!(to_pct_label(0.25), "25.0%");
        assert_eq!(to_pct_label(1.0 / 3.0), "33.3%");
        assert_eq!(to_pct_label(0.0), "0.0%");
        assert_eq!(to_pct_label(1.0), "100.0%");
        assert_eq!(to_pct_label(0.12345), "12.3%");
    }

    #[test]
    fn test_clamp01() {
        assert_eq!(clamp01(-0.2), 0.0);
        assert_eq!(clamp01(1.7), 1.0);
        assert_eq!(clamp01(0.4), 0.4);
    }

    #[test]
    fn test_bet_to_pot_floor() {
        assert_eq!(bet_to_pot(0.0, 5.0), 5.0);
        assert_eq!(bet_to_pot(50.0, 25.0), 0.5);
    }
}
