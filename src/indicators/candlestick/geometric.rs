//! Candle-geometry recognizer for the nine tagged patterns.
//!
//! Body and range sizes are judged against trailing averages of the
//! preceding bars, in the manner of the TA-Lib candle settings: a long body
//! beats the average body, a short body stays under it, a doji body is
//! within a tenth of the average range. Scores are +100 (bullish),
//! -100 (bearish) or 0, and bars without enough history score 0.

use super::{CandlestickPattern, PatternRecognizer};
use crate::core::PriceSeries;

const BULLISH: i32 = 100;
const BEARISH: i32 = -100;

/// Default pattern recognizer working from OHLC geometry alone.
#[derive(Debug, Clone)]
pub struct GeometricRecognizer {
    /// Bars averaged for body and range references.
    pub average_period: usize,
    /// Bars averaged for the "near" and "equal" distance references.
    pub near_period: usize,
    /// Doji body limit as a fraction of the average range.
    pub doji_factor: f64,
    /// Very short shadow limit as a fraction of the average range.
    pub shadow_very_short_factor: f64,
    /// "Near" distance as a fraction of the average range.
    pub near_factor: f64,
    /// "Equal" distance as a fraction of the average range.
    pub equal_factor: f64,
    /// How far the third star candle must reach into the first body.
    pub star_penetration: f64,
}

impl Default for GeometricRecognizer {
    fn default() -> Self {
        Self {
            average_period: 10,
            near_period: 5,
            doji_factor: 0.1,
            shadow_very_short_factor: 0.1,
            near_factor: 0.2,
            equal_factor: 0.05,
            star_penetration: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Candle {
    open: f64,
    high: f64,
    low: f64,
    close: f64,
}

impl Candle {
    #[inline]
    fn body(&self) -> f64 {
        (self.close - self.open).abs()
    }

    #[inline]
    fn range(&self) -> f64 {
        self.high - self.low
    }

    #[inline]
    fn body_top(&self) -> f64 {
        self.open.max(self.close)
    }

    #[inline]
    fn body_bottom(&self) -> f64 {
        self.open.min(self.close)
    }

    #[inline]
    fn upper_shadow(&self) -> f64 {
        self.high - self.body_top()
    }

    #[inline]
    fn lower_shadow(&self) -> f64 {
        self.body_bottom() - self.low
    }

    #[inline]
    fn is_white(&self) -> bool {
        self.close >= self.open
    }

    #[inline]
    fn is_black(&self) -> bool {
        self.close < self.open
    }
}

struct Bars<'a> {
    series: &'a PriceSeries,
}

impl Bars<'_> {
    fn candle(&self, i: usize) -> Candle {
        Candle {
            open: self.series.open()[i],
            high: self.series.high()[i],
            low: self.series.low()[i],
            close: self.series.close()[i],
        }
    }

    /// Mean of `f` over the `period` bars before `i`.
    fn trailing_avg<F>(&self, i: usize, period: usize, f: F) -> Option<f64>
    where
        F: Fn(&Candle) -> f64,
    {
        if period == 0 || i < period {
            return None;
        }
        let sum: f64 = (i - period..i).map(|j| f(&self.candle(j))).sum();
        Some(sum / period as f64)
    }

    fn avg_body(&self, i: usize, period: usize) -> Option<f64> {
        self.trailing_avg(i, period, Candle::body)
    }

    fn avg_range(&self, i: usize, period: usize) -> Option<f64> {
        self.trailing_avg(i, period, Candle::range)
    }
}

impl GeometricRecognizer {
    fn is_body_long(&self, bars: &Bars, i: usize) -> Option<bool> {
        Some(bars.candle(i).body() > bars.avg_body(i, self.average_period)?)
    }

    fn is_body_short(&self, bars: &Bars, i: usize) -> Option<bool> {
        Some(bars.candle(i).body() < bars.avg_body(i, self.average_period)?)
    }

    fn very_short_shadow(&self, bars: &Bars, i: usize) -> Option<f64> {
        Some(bars.avg_range(i, self.average_period)? * self.shadow_very_short_factor)
    }

    fn doji(&self, bars: &Bars, i: usize) -> Option<i32> {
        let limit = bars.avg_range(i, self.average_period)? * self.doji_factor;
        (bars.candle(i).body() <= limit).then_some(BULLISH)
    }

    fn engulfing(&self, bars: &Bars, i: usize) -> Option<i32> {
        if i < 1 {
            return None;
        }
        let prev = bars.candle(i - 1);
        let cur = bars.candle(i);

        let bullish = cur.is_white()
            && prev.is_black()
            && ((cur.close >= prev.open && cur.open < prev.close)
                || (cur.close > prev.open && cur.open <= prev.close));
        let bearish = cur.is_black()
            && prev.is_white()
            && ((cur.open >= prev.close && cur.close < prev.open)
                || (cur.open > prev.close && cur.close <= prev.open));

        if bullish {
            Some(BULLISH)
        } else if bearish {
            Some(BEARISH)
        } else {
            None
        }
    }

    fn hammer(&self, bars: &Bars, i: usize) -> Option<i32> {
        if i < 1 {
            return None;
        }
        let prev = bars.candle(i - 1);
        let cur = bars.candle(i);
        let near = bars.avg_range(i - 1, self.near_period)? * self.near_factor;

        let matched = self.is_body_short(bars, i)?
            && cur.lower_shadow() > cur.body()
            && cur.upper_shadow() < self.very_short_shadow(bars, i)?
            && cur.body_bottom() <= prev.low + near;
        matched.then_some(BULLISH)
    }

    fn shooting_star(&self, bars: &Bars, i: usize) -> Option<i32> {
        if i < 1 {
            return None;
        }
        let prev = bars.candle(i - 1);
        let cur = bars.candle(i);

        let matched = self.is_body_short(bars, i)?
            && cur.upper_shadow() > cur.body()
            && cur.lower_shadow() < self.very_short_shadow(bars, i)?
            && cur.body_bottom() > prev.body_top();
        matched.then_some(BEARISH)
    }

    fn harami(&self, bars: &Bars, i: usize) -> Option<i32> {
        if i < 1 {
            return None;
        }
        let prev = bars.candle(i - 1);
        let cur = bars.candle(i);

        let matched = self.is_body_long(bars, i - 1)?
            && self.is_body_short(bars, i)?
            && cur.body_top() < prev.body_top()
            && cur.body_bottom() > prev.body_bottom();
        if !matched {
            return None;
        }
        // Sign opposes the colour of the mother candle
        Some(if prev.is_white() { BEARISH } else { BULLISH })
    }

    fn morning_star(&self, bars: &Bars, i: usize) -> Option<i32> {
        if i < 2 {
            return None;
        }
        let first = bars.candle(i - 2);
        let star = bars.candle(i - 1);
        let third = bars.candle(i);

        let matched = first.is_black()
            && self.is_body_long(bars, i - 2)?
            && self.is_body_short(bars, i - 1)?
            && star.body_top() < first.body_bottom()
            && third.is_white()
            && third.body() > bars.avg_body(i, self.average_period)?
            && third.close > first.close + first.body() * self.star_penetration;
        matched.then_some(BULLISH)
    }

    fn evening_star(&self, bars: &Bars, i: usize) -> Option<i32> {
        if i < 2 {
            return None;
        }
        let first = bars.candle(i - 2);
        let star = bars.candle(i - 1);
        let third = bars.candle(i);

        let matched = first.is_white()
            && self.is_body_long(bars, i - 2)?
            && self.is_body_short(bars, i - 1)?
            && star.body_bottom() > first.body_top()
            && third.is_black()
            && third.body() > bars.avg_body(i, self.average_period)?
            && third.close < first.close - first.body() * self.star_penetration;
        matched.then_some(BEARISH)
    }

    fn separating_lines(&self, bars: &Bars, i: usize) -> Option<i32> {
        if i < 1 {
            return None;
        }
        let prev = bars.candle(i - 1);
        let cur = bars.candle(i);
        let equal = bars.avg_range(i - 1, self.near_period)? * self.equal_factor;
        let very_short = self.very_short_shadow(bars, i)?;

        if (cur.open - prev.open).abs() > equal || !self.is_body_long(bars, i)? {
            return None;
        }

        if cur.is_white() && prev.is_black() && cur.lower_shadow() < very_short {
            Some(BULLISH)
        } else if cur.is_black() && prev.is_white() && cur.upper_shadow() < very_short {
            Some(BEARISH)
        } else {
            None
        }
    }

    fn three_methods(&self, bars: &Bars, i: usize) -> Option<i32> {
        if i < 4 {
            return None;
        }
        let first = bars.candle(i - 4);
        let middle = [bars.candle(i - 3), bars.candle(i - 2), bars.candle(i - 1)];
        let last = bars.candle(i);

        if !self.is_body_long(bars, i - 4)? || !self.is_body_long(bars, i)? {
            return None;
        }
        for j in (i - 3)..i {
            if !self.is_body_short(bars, j)? {
                return None;
            }
        }

        let held = middle
            .iter()
            .all(|c| c.body_bottom() < first.high && c.body_top() > first.low);
        if !held {
            return None;
        }

        let rising = first.is_white()
            && middle.iter().all(Candle::is_black)
            && last.is_white()
            && middle[0].close > middle[1].close
            && middle[1].close > middle[2].close
            && last.open > middle[2].close
            && last.close > first.close;
        let falling = first.is_black()
            && middle.iter().all(Candle::is_white)
            && last.is_black()
            && middle[0].close < middle[1].close
            && middle[1].close < middle[2].close
            && last.open < middle[2].close
            && last.close < first.close;

        if rising {
            Some(BULLISH)
        } else if falling {
            Some(BEARISH)
        } else {
            None
        }
    }
}

impl PatternRecognizer for GeometricRecognizer {
    fn recognize(&self, pattern: CandlestickPattern, series: &PriceSeries) -> Vec<i32> {
        let bars = Bars { series };
        (0..series.len())
            .map(|i| {
                let score = match pattern {
                    CandlestickPattern::Doji => self.doji(&bars, i),
                    CandlestickPattern::Engulfing => self.engulfing(&bars, i),
                    CandlestickPattern::EveningStar => self.evening_star(&bars, i),
                    CandlestickPattern::Hammer => self.hammer(&bars, i),
                    CandlestickPattern::Harami => self.harami(&bars, i),
                    CandlestickPattern::MorningStar => self.morning_star(&bars, i),
                    CandlestickPattern::SeparatingLines => self.separating_lines(&bars, i),
                    CandlestickPattern::ShootingStar => self.shooting_star(&bars, i),
                    CandlestickPattern::ThreeMethods => self.three_methods(&bars, i),
                };
                score.unwrap_or(0)
            })
            .collect()
    }
}
