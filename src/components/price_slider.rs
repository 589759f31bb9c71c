use alloy::primitives::U256;
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::theme::THEME;
use crate::utils;

/// 0.0001 ETH in wei.
pub const LISTING_STEP_WEI: u64 = 100_000_000_000_000;
/// Listing bounds in steps: [0.005, 0.007] ETH, default 0.006.
pub const LISTING_MIN_STEPS: u64 = 50;
pub const LISTING_MAX_STEPS: u64 = 70;
pub const LISTING_DEFAULT_STEPS: u64 = 60;

/// A bounded price selector over a closed range of whole steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSlider {
    min: u64,
    max: u64,
    step_wei: U256,
    ticks: u64,
}

impl PriceSlider {
    pub fn new(min: u64, max: u64, default: u64, step_wei: U256) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            step_wei,
            ticks: default.clamp(min, max),
        }
    }

    /// The resale slider used by the Sell Ticket page.
    pub fn listing() -> Self {
        Self::new(
            LISTING_MIN_STEPS,
            LISTING_MAX_STEPS,
            LISTING_DEFAULT_STEPS,
            U256::from(LISTING_STEP_WEI),
        )
    }

    pub fn increase(&mut self, steps: u64) {
        self.set_ticks(self.ticks.saturating_add(steps));
    }

    pub fn decrease(&mut self, steps: u64) {
        self.set_ticks(self.ticks.saturating_sub(steps));
    }

    pub fn set_ticks(&mut self, ticks: u64) {
        self.ticks = ticks.clamp(self.min, self.max);
    }

    pub fn to_min(&mut self) {
        self.ticks = self.min;
    }

    pub fn to_max(&mut self) {
        self.ticks = self.max;
    }

    pub fn price_wei(&self) -> U256 {
        U256::from(self.ticks) * self.step_wei
    }

    pub fn min_wei(&self) -> U256 {
        U256::from(self.min) * self.step_wei
    }

    pub fn max_wei(&self) -> U256 {
        U256::from(self.max) * self.step_wei
    }

    /// Price with four decimals, as shown next to the slider.
    pub fn display(&self) -> String {
        utils::format_eth_fixed(self.price_wei(), 4)
    }

    fn ratio(&self) -> f64 {
        if self.max == self.min {
            return 1.0;
        }
        (self.ticks - self.min) as f64 / (self.max - self.min) as f64
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let gauge = LineGauge::default()
            .filled_style(THEME.accent_style())
            .unfilled_style(THEME.muted_style())
            .label(Span::styled(
                format!("{} ETH ", self.display()),
                Style::default().fg(THEME.text).add_modifier(Modifier::BOLD),
            ))
            .ratio(self.ratio());
        frame.render_widget(gauge, area);
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_listing_defaults() {
        let slider = PriceSlider::listing();
        assert_eq!(slider.display(), "0.0060");
        assert_eq!(slider.min_wei(), U256::from(5_000_000_000_000_000u64));
        assert_eq!(slider.max_wei(), U256::from(7_000_000_000_000_000u64));
    }

    #[test]
    fn test_clamps_at_both_ends() {
        let mut slider = PriceSlider::listing();
        slider.increase(1000);
        assert_eq!(slider.display(), "0.0070");
        slider.decrease(u64::MAX);
        assert_eq!(slider.display(), "0.0050");
    }

    #[test]
    fn test_single_step() {
        let mut slider = PriceSlider::listing();
        slider.increase(1);
        assert_eq!(slider.display(), "0.0061");
        assert_eq!(slider.price_wei(), U256::from(6_100_000_000_000_000u64));
    }

    #[test]
    fn test_swapped_bounds_are_normalised() {
        let slider = PriceSlider::new(70, 50, 10, U256::from(1));
        assert_eq!(slider.price_wei(), U256::from(50));
    }

    #[test]
    fn test_ratio_endpoints() {
        let mut slider = PriceSlider::listing();
        slider.to_min();
        assert_eq!(slider.ratio(), 0.0);
        slider.to_max();
        assert_eq!(slider.ratio(), 1.0);
    }

    #[derive(Debug, Clone)]
    enum Move {
        Up(u64),
        Down(u64),
        Set(u64),
    }

    fn any_move() -> impl Strategy<Value = Move> {
        prop_oneof![
            (0u64..100).prop_map(Move::Up),
            (0u64..100).prop_map(Move::Down),
            any::<u64>().prop_map(Move::Set),
        ]
    }

    proptest! {
        #[test]
        fn prop_price_stays_in_closed_interval(moves in proptest::collection::vec(any_move(), 0..64)) {
            let mut slider = PriceSlider::listing();
            for m in moves {
                match m {
                    Move::Up(n) => slider.increase(n),
                    Move::Down(n) => slider.decrease(n),
                    Move::Set(n) => slider.set_ticks(n),
                }
                let price = slider.price_wei();
                prop_assert!(price >= slider.min_wei());
                prop_assert!(price <= slider.max_wei());
                prop_assert_eq!(price % U256::from(LISTING_STEP_WEI), U256::ZERO);
            }
        }
    }
}
