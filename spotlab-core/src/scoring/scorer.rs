//! Buy/sell signal scoring over the last rows of an indicator frame.
//!
//! Each signal family contributes a weighted amount scaled by the ADX regime
//! factor, with the ordering of sections fixed: the in-cloud and doji
//! penalties multiply whatever has accumulated before them, and the sideway
//! penalty, very-strong-trend winner boost, and consensus boost apply last.
//! Pure over its inputs; NaN in any series skips that family.

use crate::domain::{Candle, Trigger, TriggerSet};
use crate::indicators::{value_at, IndicatorFrame};

use super::weights::ScoreWeights;

/// Looking back this many bars for stochastic divergence.
const DIVERGENCE_LOOKBACK: usize = 9;

/// Triggers treated as strong bullish evidence for the consensus boost.
const STRONG_BULLISH: [Trigger; 5] = [
    Trigger::IchimokuBullishCross,
    Trigger::BullishAlignment,
    Trigger::MacdStrongBullish,
    Trigger::FibStrongBounce,
    Trigger::ObvBullishConfirm,
];

const STRONG_BEARISH: [Trigger; 5] = [
    Trigger::IchimokuBearishCross,
    Trigger::BearishAlignment,
    Trigger::MacdStrongBearish,
    Trigger::FibStrongRejection,
    Trigger::ObvBearishConfirm,
];

#[derive(Debug, Clone)]
pub struct ScoreBreakdown {
    pub buy_score: f64,
    pub sell_score: f64,
    pub triggers: TriggerSet,
}

#[derive(Debug, Clone, Default)]
pub struct SignalScorer {
    weights: ScoreWeights,
}

impl SignalScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    pub fn score(&self, candles: &[Candle], frame: &IndicatorFrame) -> ScoreBreakdown {
        let w = &self.weights;
        let i = frame.last_index();
        let p = i - 1;
        let close = candles[i].close;
        let prev_close = candles[p].close;

        let mut buy = 0.0;
        let mut sell = 0.0;
        let mut triggers = TriggerSet::new();

        // Trend regime from ADX.
        let mut adx_strength = 1.0;
        let mut very_strong = false;
        if let Some(adx) = value_at(&frame.adx, i) {
            if adx > 30.0 {
                adx_strength = 1.5;
                very_strong = true;
                triggers.insert(Trigger::VeryStrongTrend);
            } else if adx > 25.0 {
                adx_strength = 1.3;
                triggers.insert(Trigger::StrongTrend);
            } else if adx > 20.0 {
                adx_strength = 1.0;
            } else {
                adx_strength = 0.6;
                triggers.insert(Trigger::WeakTrend);
            }
        }

        // Range regime from Bollinger band width vs its own average.
        let mut sideway_penalty = 1.0;
        if let (Some(width), Some(width_sma)) =
            (value_at(&frame.bb_width, i), value_at(&frame.bb_width_sma, i))
        {
            let ratio = width / width_sma;
            if ratio < 0.7 {
                sideway_penalty = 0.3;
                triggers.insert(Trigger::VeryNarrowRange);
            } else if ratio < 0.8 {
                sideway_penalty = 0.5;
                triggers.insert(Trigger::NarrowRange);
            } else if ratio > 1.3 {
                sideway_penalty = 1.2;
                triggers.insert(Trigger::ExpandingRange);
            }
        }

        let volume_ratio = value_at(&frame.volume_ratio, i);

        // Ichimoku: tenkan/kijun cross plus price vs cloud.
        if let (Some(tenkan), Some(kijun), Some(tenkan_prev), Some(kijun_prev)) = (
            value_at(&frame.tenkan, i),
            value_at(&frame.kijun, i),
            value_at(&frame.tenkan, p),
            value_at(&frame.kijun, p),
        ) {
            if tenkan > kijun && tenkan_prev <= kijun_prev {
                let volume_boost = if volume_ratio.is_some_and(|r| r > 1.2) {
                    1.3
                } else {
                    1.0
                };
                buy += w.ichimoku_cross * adx_strength * volume_boost;
                triggers.insert(Trigger::IchimokuBullishCross);
            } else if tenkan < kijun && tenkan_prev >= kijun_prev {
                sell += w.ichimoku_cross * adx_strength;
                triggers.insert(Trigger::IchimokuBearishCross);
            }

            if let (Some(span_a), Some(span_b)) =
                (value_at(&frame.senkou_a, i), value_at(&frame.senkou_b, i))
            {
                let cloud_top = span_a.max(span_b);
                let cloud_bottom = span_a.min(span_b);
                let thickness = (cloud_top - cloud_bottom) / close;
                let cloud_bonus = if thickness > 0.02 { 1.2 } else { 1.0 };

                if close > cloud_top {
                    buy += w.cloud_position * adx_strength * cloud_bonus;
                    triggers.insert(Trigger::PriceAboveCloud);
                } else if close < cloud_bottom {
                    sell += w.cloud_position * adx_strength * cloud_bonus;
                    triggers.insert(Trigger::PriceBelowCloud);
                } else {
                    // Inside the cloud: dampen everything scored so far.
                    buy *= w.in_cloud_penalty;
                    sell *= w.in_cloud_penalty;
                    triggers.insert(Trigger::PriceInCloud);
                }
            }
        }

        // EMA crossover and full-stack alignment.
        if let (Some(e10), Some(e20), Some(e50), Some(e10p), Some(e20p), Some(e50p)) = (
            value_at(&frame.ema_10, i),
            value_at(&frame.ema_20, i),
            value_at(&frame.ema_50, i),
            value_at(&frame.ema_10, p),
            value_at(&frame.ema_20, p),
            value_at(&frame.ema_50, p),
        ) {
            if e10 > e20 && e10p <= e20p {
                let strength = ((e10 - e20) / close * 1000.0).min(2.0);
                buy += w.ema_cross * adx_strength * (1.0 + strength);
                triggers.insert(Trigger::EmaBullishCross);
            } else if e10 < e20 && e10p >= e20p {
                let strength = ((e20 - e10) / close * 1000.0).min(2.0);
                sell += w.ema_cross * adx_strength * (1.0 + strength);
                triggers.insert(Trigger::EmaBearishCross);
            }

            if close > e10 && e10 > e20 && e20 > e50 {
                let rising = e10 > e10p && e20 > e20p && e50 > e50p;
                let alignment = if rising { 1.5 } else { 1.0 };
                buy += w.ema_alignment * adx_strength * alignment;
                triggers.insert(Trigger::BullishAlignment);
            } else if close < e10 && e10 < e20 && e20 < e50 {
                let falling = e10 < e10p && e20 < e20p && e50 < e50p;
                let alignment = if falling { 1.5 } else { 1.0 };
                sell += w.ema_alignment * adx_strength * alignment;
                triggers.insert(Trigger::BearishAlignment);
            }
        }

        // Stochastic crossover, graded by where it happens, plus divergence.
        if let (Some(k), Some(d), Some(kp), Some(dp)) = (
            value_at(&frame.stoch_k, i),
            value_at(&frame.stoch_d, i),
            value_at(&frame.stoch_k, p),
            value_at(&frame.stoch_d, p),
        ) {
            if k > d && kp <= dp {
                let strength = if k < 30.0 {
                    w.stoch_oversold_cross
                } else if k < 50.0 {
                    w.stoch_mid_cross
                } else {
                    w.stoch_weak_cross
                };
                buy += strength * adx_strength;
                triggers.insert(Trigger::StochBullishCross);
            } else if k < d && kp >= dp {
                let strength = if k > 70.0 {
                    w.stoch_oversold_cross
                } else if k > 50.0 {
                    w.stoch_mid_cross
                } else {
                    w.stoch_weak_cross
                };
                sell += strength * adx_strength;
                triggers.insert(Trigger::StochBearishCross);
            }

            if i >= DIVERGENCE_LOOKBACK {
                if let Some(k_back) = value_at(&frame.stoch_k, i - DIVERGENCE_LOOKBACK) {
                    let stoch_trend = k - k_back;
                    let price_trend = close - candles[i - DIVERGENCE_LOOKBACK].close;
                    if price_trend < 0.0 && stoch_trend > 0.0 && k < 40.0 {
                        buy += w.stoch_divergence * adx_strength;
                        triggers.insert(Trigger::StochBullishDivergence);
                    } else if price_trend > 0.0 && stoch_trend < 0.0 && k > 60.0 {
                        sell += w.stoch_divergence * adx_strength;
                        triggers.insert(Trigger::StochBearishDivergence);
                    }
                }
            }
        }

        // RSI level tiers gated on bar-over-bar momentum.
        if let (Some(rsi), Some(rsi_prev)) = (value_at(&frame.rsi, i), value_at(&frame.rsi, p)) {
            let momentum = rsi - rsi_prev;
            if rsi < 25.0 && momentum > 0.0 {
                buy += w.rsi_deep * adx_strength;
                triggers.insert(Trigger::RsiDeepOversoldRecovery);
            } else if rsi < 35.0 && momentum > 1.0 {
                buy += w.rsi_strong * adx_strength;
                triggers.insert(Trigger::RsiOversoldRecovery);
            } else if (40.0..=55.0).contains(&rsi) && momentum > 0.0 {
                buy += w.rsi_neutral * adx_strength;
                triggers.insert(Trigger::RsiNeutralBullish);
            } else if rsi > 75.0 && momentum < 0.0 {
                sell += w.rsi_deep * adx_strength;
                triggers.insert(Trigger::RsiOverboughtDecline);
            } else if rsi > 65.0 && momentum < -1.0 {
                sell += w.rsi_strong * adx_strength;
                triggers.insert(Trigger::RsiStrongDecline);
            }
        }

        // OBV / price confirmation and divergence.
        if let (Some(obv), Some(obv_sma), Some(obv_prev)) = (
            value_at(&frame.obv, i),
            value_at(&frame.obv_sma, i),
            value_at(&frame.obv, p),
        ) {
            let obv_momentum = obv - obv_prev;
            let price_momentum = close - prev_close;

            if obv_momentum > 0.0 && price_momentum > 0.0 {
                if obv > obv_sma {
                    buy += w.obv_confirm * adx_strength;
                    triggers.insert(Trigger::ObvBullishConfirm);
                } else {
                    buy += w.obv_mild * adx_strength;
                    triggers.insert(Trigger::ObvMildBullish);
                }
            } else if obv_momentum < 0.0 && price_momentum < 0.0 {
                if obv < obv_sma {
                    sell += w.obv_confirm * adx_strength;
                    triggers.insert(Trigger::ObvBearishConfirm);
                } else {
                    sell += w.obv_mild * adx_strength;
                    triggers.insert(Trigger::ObvMildBearish);
                }
            } else if obv_momentum > 0.0 && price_momentum < 0.0 {
                buy += w.obv_divergence * adx_strength;
                triggers.insert(Trigger::ObvBullishDivergence);
            } else if obv_momentum < 0.0 && price_momentum > 0.0 {
                sell += w.obv_divergence * adx_strength;
                triggers.insert(Trigger::ObvBearishDivergence);
            }
        }

        // MACD line cross graded by histogram, zero-line cross otherwise.
        if let (Some(macd), Some(signal), Some(hist), Some(macd_prev), Some(signal_prev), Some(hist_prev)) = (
            value_at(&frame.macd, i),
            value_at(&frame.macd_signal, i),
            value_at(&frame.macd_hist, i),
            value_at(&frame.macd, p),
            value_at(&frame.macd_signal, p),
            value_at(&frame.macd_hist, p),
        ) {
            let hist_momentum = hist - hist_prev;

            if macd > signal && macd_prev <= signal_prev {
                if hist > 0.0 && hist_momentum > 0.0 {
                    buy += w.macd_strong * adx_strength;
                    triggers.insert(Trigger::MacdStrongBullish);
                } else if hist_momentum > 0.0 {
                    buy += w.macd_improving * adx_strength;
                    triggers.insert(Trigger::MacdBullishImproving);
                } else {
                    buy += w.macd_weak * adx_strength;
                    triggers.insert(Trigger::MacdWeakBullish);
                }
            } else if macd < signal && macd_prev >= signal_prev {
                if hist < 0.0 && hist_momentum < 0.0 {
                    sell += w.macd_strong * adx_strength;
                    triggers.insert(Trigger::MacdStrongBearish);
                } else if hist_momentum < 0.0 {
                    sell += w.macd_improving * adx_strength;
                    triggers.insert(Trigger::MacdBearishDeteriorating);
                } else {
                    sell += w.macd_weak * adx_strength;
                    triggers.insert(Trigger::MacdWeakBearish);
                }
            } else if macd > 0.0 && macd_prev <= 0.0 {
                buy += w.macd_zero_cross * adx_strength;
                triggers.insert(Trigger::MacdAboveZero);
            } else if macd < 0.0 && macd_prev >= 0.0 {
                sell += w.macd_zero_cross * adx_strength;
                triggers.insert(Trigger::MacdBelowZero);
            }
        }

        // Fibonacci level proximity: the first level within 0.8% decides.
        // 38.2/50/61.8 are the strong levels, 23.6 the mild one.
        for (ratio, level) in [
            (0.236, frame.fib.l236),
            (0.382, frame.fib.l382),
            (0.5, frame.fib.l500),
            (0.618, frame.fib.l618),
        ] {
            let distance = (close - level).abs() / close;
            if distance >= 0.008 {
                continue;
            }
            let strong = ratio > 0.3;
            if close > prev_close {
                if strong {
                    buy += w.fib_strong * adx_strength;
                    triggers.insert(Trigger::FibStrongBounce);
                } else {
                    buy += w.fib_mild * adx_strength;
                    triggers.insert(Trigger::FibMildBounce);
                }
            } else if close < prev_close {
                if strong {
                    sell += w.fib_strong * adx_strength;
                    triggers.insert(Trigger::FibStrongRejection);
                } else {
                    sell += w.fib_mild * adx_strength;
                    triggers.insert(Trigger::FibMildRejection);
                }
            }
            break;
        }

        // Candlestick shapes, boosted at support/resistance and on volume.
        let near_support = value_at(&frame.support, i)
            .is_some_and(|s| (close - s).abs() / close < 0.015);
        let near_resistance = value_at(&frame.resistance, i)
            .is_some_and(|r| (close - r).abs() / close < 0.015);
        let volume_confirm = volume_ratio.is_some_and(|r| r > 1.2);

        let mut bullish_patterns = 0.0;
        for (flag, trigger) in [
            (frame.patterns.hammer[i], Trigger::BullishHammer),
            (frame.patterns.bullish_engulfing[i], Trigger::BullishEngulfing),
            (frame.patterns.morning_star[i], Trigger::MorningStar),
        ] {
            if !flag {
                continue;
            }
            let mut strength = w.pattern_base;
            if near_support {
                strength *= w.pattern_support_boost;
                triggers.insert(Trigger::PatternAtSupport);
            }
            if volume_confirm {
                strength *= w.pattern_volume_boost;
                triggers.insert(Trigger::PatternVolumeConfirm);
            }
            bullish_patterns += strength * adx_strength;
            triggers.insert(trigger);
        }
        buy += bullish_patterns;

        let mut bearish_patterns = 0.0;
        for (flag, trigger) in [
            (frame.patterns.hanging_man[i], Trigger::HangingMan),
            (frame.patterns.evening_star[i], Trigger::EveningStar),
        ] {
            if !flag {
                continue;
            }
            let mut strength = w.pattern_base;
            if near_resistance {
                strength *= w.pattern_support_boost;
                triggers.insert(Trigger::PatternAtResistance);
            }
            if volume_confirm {
                strength *= w.pattern_volume_boost;
            }
            bearish_patterns += strength * adx_strength;
            triggers.insert(trigger);
        }
        sell += bearish_patterns;

        if frame.patterns.doji[i] {
            buy *= w.doji_penalty;
            sell *= w.doji_penalty;
            triggers.insert(Trigger::DojiIndecision);
        }

        // Regime modulation and consensus, in this order.
        buy *= sideway_penalty;
        sell *= sideway_penalty;

        if very_strong {
            if buy > sell {
                buy *= w.very_strong_winner_boost;
            } else {
                sell *= w.very_strong_winner_boost;
            }
        }

        if triggers.count_of(&STRONG_BULLISH) >= 3 {
            buy *= w.consensus_boost;
            triggers.insert(Trigger::BullishConsensus);
        }
        if triggers.count_of(&STRONG_BEARISH) >= 3 {
            sell *= w.consensus_boost;
            triggers.insert(Trigger::BearishConsensus);
        }

        ScoreBreakdown {
            buy_score: buy,
            sell_score: sell,
            triggers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{make_candles, make_ohlc_candles};

    fn score(candles: &[Candle]) -> ScoreBreakdown {
        let frame = IndicatorFrame::compute(candles).unwrap();
        SignalScorer::new().score(candles, &frame)
    }

    #[test]
    fn flat_market_scores_nothing() {
        let candles = make_ohlc_candles(&[(100.0, 100.0, 100.0, 100.0); 60]);
        let out = score(&candles);
        assert_eq!(out.buy_score, 0.0);
        assert_eq!(out.sell_score, 0.0);
    }

    #[test]
    fn sustained_rally_is_bullish() {
        let closes: Vec<f64> = (0..200).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let candles = make_candles(&closes);
        let out = score(&candles);
        assert!(out.buy_score > out.sell_score);
        assert!(out.triggers.contains(Trigger::BullishAlignment));
        assert!(out.triggers.contains(Trigger::VeryStrongTrend));
        assert!(out.triggers.contains(Trigger::PriceAboveCloud));
    }

    #[test]
    fn sustained_selloff_is_bearish() {
        let closes: Vec<f64> = (0..200).map(|i| 100.0 * 0.99_f64.powi(i)).collect();
        let candles = make_candles(&closes);
        let out = score(&candles);
        assert!(out.sell_score > out.buy_score);
        assert!(out.triggers.contains(Trigger::BearishAlignment));
        assert!(out.triggers.contains(Trigger::PriceBelowCloud));
    }

    #[test]
    fn doji_flags_indecision() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.4).sin() * 3.0).collect();
        let mut candles = make_candles(&closes);
        // Replace the last bar with a doji: wide range, near-zero body.
        let last = candles.last_mut().unwrap();
        last.open = 100.0;
        last.close = 100.05;
        last.high = 103.0;
        last.low = 97.0;
        let out = score(&candles);
        assert!(out.triggers.contains(Trigger::DojiIndecision));
    }

    #[test]
    fn weights_scale_scores() {
        let closes: Vec<f64> = (0..200).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let candles = make_candles(&closes);
        let frame = IndicatorFrame::compute(&candles).unwrap();
        let base = SignalScorer::new().score(&candles, &frame);

        let mut weights = ScoreWeights::default();
        weights.ema_alignment *= 2.0;
        weights.cloud_position *= 2.0;
        let boosted = SignalScorer::with_weights(weights).score(&candles, &frame);
        assert!(boosted.buy_score > base.buy_score);
    }
}
