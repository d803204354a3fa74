#![allow(dead_code)]

use barsim::domain::agent::{AgentConfig, TradingAgent};
use barsim::domain::error::{BarsimError, RecordError};
pub use barsim::domain::ohlcv::Bar;
use barsim::ports::data_port::BarSource;
use std::collections::VecDeque;
use std::io::Write;

pub const HEADER: &str = "unix,date,symbol,open,high,low,close,Volume ETH,Volume USDT,tradecount";

/// In-memory source that can inject a malformed record at any position.
pub struct MockBarSource {
    items: VecDeque<Result<Bar, RecordError>>,
    pub pulls: usize,
}

impl MockBarSource {
    pub fn new(bars: Vec<Bar>) -> Self {
        Self {
            items: bars.into_iter().map(Ok).collect(),
            pulls: 0,
        }
    }

    pub fn with_error_at(mut self, index: usize, err: RecordError) -> Self {
        self.items.insert(index, Err(err));
        self
    }
}

impl BarSource for MockBarSource {
    fn next_bar(&mut self) -> Result<Option<Bar>, BarsimError> {
        self.pulls += 1;
        match self.items.pop_front() {
            Some(Ok(bar)) => Ok(Some(bar)),
            Some(Err(e)) => Err(e.into()),
            None => Ok(None),
        }
    }
}

pub fn make_bar(date: &str, high: f64, low: f64) -> Bar {
    Bar {
        date: date.to_string(),
        open: (high + low) / 2.0,
        high,
        low,
        close: (high + low) / 2.0,
        base_volume: 100.0,
        quote_volume: 100.0 * (high + low) / 2.0,
        trade_count: 10,
    }
}

/// Bars t0, t1, ... from parallel high/low series.
pub fn make_bars(highs: &[f64], lows: &[f64]) -> Vec<Bar> {
    highs
        .iter()
        .zip(lows)
        .enumerate()
        .map(|(i, (&h, &l))| make_bar(&format!("t{i}"), h, l))
        .collect()
}

pub fn make_agent(buy_len: usize, sell_len: usize, amount: f64) -> TradingAgent {
    TradingAgent::new(AgentConfig {
        buy_len,
        sell_len,
        amount,
    })
    .unwrap()
}

/// One CSV line in the default column layout.
pub fn csv_line(unix: i64, date: &str, high: f64, low: f64) -> String {
    let mid = (high + low) / 2.0;
    format!("{unix},{date},ETH/USDT,{mid},{high},{low},{mid},100.0,{},10", 100.0 * mid)
}

pub fn write_temp_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Header plus one line per (high, low) pair, dated one minute apart.
pub fn write_bar_csv(rows: &[(f64, f64)]) -> tempfile::NamedTempFile {
    let mut content = String::from(HEADER);
    content.push('\n');
    for (i, &(high, low)) in rows.iter().enumerate() {
        let date = format!("2021-01-01 00:{:02}:00", i);
        content.push_str(&csv_line(1_609_459_200 + 60 * i as i64, &date, high, low));
        content.push('\n');
    }
    write_temp_file(&content)
}
