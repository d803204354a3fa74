//! Summary statistics over the transaction ledger.

use crate::domain::position::Transaction;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TradeStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub total_pnl: f64,
    pub average_pnl: f64,
    pub best_trade: f64,
    pub worst_trade: f64,
    /// Mean of per-trade returns, skipping trades opened at a zero price.
    pub average_return: f64,
}

impl TradeStats {
    /// All fields are zero for an empty ledger.
    pub fn compute(ledger: &[Transaction]) -> Self {
        if ledger.is_empty() {
            return TradeStats::default();
        }

        let n = ledger.len() as f64;
        let pnls: Vec<f64> = ledger.iter().map(Transaction::pnl).collect();
        let total_pnl: f64 = pnls.iter().sum();
        let returns: Vec<f64> = ledger.iter().filter_map(Transaction::return_pct).collect();
        let average_return = if returns.is_empty() {
            0.0
        } else {
            returns.iter().sum::<f64>() / returns.len() as f64
        };

        TradeStats {
            total_trades: ledger.len(),
            winning_trades: pnls.iter().filter(|&&p| p > 0.0).count(),
            total_pnl,
            average_pnl: total_pnl / n,
            best_trade: pnls.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            worst_trade: pnls.iter().copied().fold(f64::INFINITY, f64::min),
            average_return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn tx(buy: f64, sell: f64, amount: f64) -> Transaction {
        Transaction {
            buy_price: buy,
            sell_price: sell,
            amount,
            buy_time: "b".into(),
            sell_time: "s".into(),
        }
    }

    #[test]
    fn empty_ledger() {
        assert_eq!(TradeStats::compute(&[]), TradeStats::default());
    }

    #[test]
    fn single_trade() {
        let stats = TradeStats::compute(&[tx(100.0, 110.0, 2.0)]);
        assert_eq!(stats.total_trades, 1);
        assert_eq!(stats.winning_trades, 1);
        assert_relative_eq!(stats.total_pnl, 20.0);
        assert_relative_eq!(stats.average_pnl, 20.0);
        assert_relative_eq!(stats.best_trade, 20.0);
        assert_relative_eq!(stats.worst_trade, 20.0);
        assert_relative_eq!(stats.average_return, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn several_trades() {
        let ledger = [tx(10.0, 11.0, 1.0), tx(20.0, 25.0, 1.0), tx(4.0, 4.5, 2.0)];
        let stats = TradeStats::compute(&ledger);
        assert_eq!(stats.total_trades, 3);
        assert_eq!(stats.winning_trades, 3);
        assert_relative_eq!(stats.total_pnl, 7.0);
        assert_relative_eq!(stats.average_pnl, 7.0 / 3.0);
        assert_relative_eq!(stats.best_trade, 5.0);
        assert_relative_eq!(stats.worst_trade, 1.0);
        assert_relative_eq!(
            stats.average_return,
            (0.1 + 0.25 + 0.125) / 3.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn zero_price_entry_is_left_out_of_average_return() {
        let stats = TradeStats::compute(&[tx(0.0, 2.0, 1.0), tx(10.0, 12.0, 1.0)]);
        assert_relative_eq!(stats.total_pnl, 4.0);
        assert_relative_eq!(stats.average_return, 0.2, epsilon = 1e-12);
        assert!(stats.average_return.is_finite());

        let only_zero = TradeStats::compute(&[tx(0.0, 2.0, 1.0)]);
        assert_eq!(only_zero.average_return, 0.0);
    }

    #[test]
    fn losing_trade_counts_against_wins() {
        // not produced by the agent, but the stats don't assume it
        let stats = TradeStats::compute(&[tx(10.0, 9.0, 1.0), tx(10.0, 12.0, 1.0)]);
        assert_eq!(stats.winning_trades, 1);
        assert_relative_eq!(stats.worst_trade, -1.0);
    }
}
