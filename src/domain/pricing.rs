//! Freight pricing engine.
//!
//! Pure functions combining a rate card and container quantity into an
//! itemized price breakdown with a minimum-charge floor. Dispatch over
//! (mode, service) is an exhaustive match on closed enums: a pairing
//! without a formula prices to `None`, and a new enum variant is a
//! compile error until every arm here handles it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entity::{RateCard, ServiceKind, TransportMode};

/// Itemized charges exposed by a pricing formula.
///
/// Each (mode, service) formula surfaces its own component set, so the
/// breakdown shape documents which tariff fields actually participated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChargeSet {
    /// Road local-charge components.
    RoadLocal {
        trucking: Decimal,
        docs: Decimal,
        othc: Decimal,
    },
    /// Sea freight components.
    SeaFreight {
        freight_cost: Decimal,
        othc: Decimal,
    },
}

/// Full pricing result for one service line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Sum of the formula's components, before the floor.
    pub subtotal: Decimal,
    /// True iff the minimum charge clamped the total upward.
    pub minimum_applied: bool,
    /// Billed total: max(subtotal, minimum_charge).
    pub total: Decimal,
    /// Per-formula itemized components.
    pub breakdown: ChargeSet,
}

/// Round a monetary amount to 2 decimal places.
fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp(2)
}

/// Price one service line from a rate card.
///
/// Returns `None` when the card's (mode, service) pairing has no
/// pricing formula — the caller reports "no available rates" rather
/// than inventing a price.
pub fn price(card: &RateCard, container_quantity: u32) -> Option<PriceBreakdown> {
    let (subtotal, breakdown) = match (card.mode, card.service) {
        (TransportMode::Road, ServiceKind::LocalCharge) => {
            let trucking_cost = card.trucking + card.docs;
            let subtotal = trucking_cost + card.othc;
            let breakdown = ChargeSet::RoadLocal {
                trucking: round_money(card.trucking),
                docs: round_money(card.docs),
                othc: round_money(card.othc),
            };
            (subtotal, breakdown)
        }
        (TransportMode::Sea, ServiceKind::Freight) => {
            let freight_cost = Decimal::from(container_quantity) * card.freight;
            let subtotal = freight_cost + card.othc;
            let breakdown = ChargeSet::SeaFreight {
                freight_cost: round_money(freight_cost),
                othc: round_money(card.othc),
            };
            (subtotal, breakdown)
        }
        // No formula exists for these pairings.
        (TransportMode::Road, ServiceKind::Freight)
        | (TransportMode::Sea, ServiceKind::LocalCharge) => return None,
    };

    let total = subtotal.max(card.minimum_charge);

    Some(PriceBreakdown {
        subtotal: round_money(subtotal),
        minimum_applied: total != subtotal,
        total: round_money(total),
        breakdown,
    })
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rust_decimal_macros::dec;

    use super::*;

    fn card(mode: TransportMode, service: ServiceKind) -> RateCard {
        RateCard {
            id: "rc_test".to_string(),
            country: "KH".to_string(),
            mode,
            service,
            trucking: dec!(120.00),
            docs: dec!(35.00),
            freight: dec!(900.00),
            othc: dec!(65.00),
            minimum_charge: dec!(0.00),
            currency: "USD".to_string(),
            transit_time: None,
            active: true,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_road_local_subtotal_is_trucking_docs_othc() {
        let card = card(TransportMode::Road, ServiceKind::LocalCharge);
        let result = price(&card, 1).unwrap();
        assert_eq!(result.subtotal, dec!(220.00));
        assert_eq!(result.total, dec!(220.00));
        assert!(!result.minimum_applied);
        assert_eq!(
            result.breakdown,
            ChargeSet::RoadLocal {
                trucking: dec!(120.00),
                docs: dec!(35.00),
                othc: dec!(65.00),
            }
        );
    }

    #[test]
    fn test_sea_freight_scales_with_quantity() {
        let card = card(TransportMode::Sea, ServiceKind::Freight);
        let result = price(&card, 3).unwrap();
        assert_eq!(result.subtotal, dec!(2765.00)); // 3 × 900 + 65
        match result.breakdown {
            ChargeSet::SeaFreight { freight_cost, othc } => {
                assert_eq!(freight_cost, dec!(2700.00));
                assert_eq!(othc, dec!(65.00));
            }
            other => panic!("wrong breakdown shape: {other:?}"),
        }
    }

    #[test]
    fn test_minimum_charge_floors_the_total() {
        let mut card = card(TransportMode::Road, ServiceKind::LocalCharge);
        card.minimum_charge = dec!(500.00);
        let result = price(&card, 1).unwrap();
        assert_eq!(result.subtotal, dec!(220.00));
        assert_eq!(result.total, dec!(500.00));
        assert!(result.minimum_applied);
    }

    #[test]
    fn test_minimum_equal_to_subtotal_is_not_flagged() {
        let mut card = card(TransportMode::Road, ServiceKind::LocalCharge);
        card.minimum_charge = dec!(220.00);
        let result = price(&card, 1).unwrap();
        assert_eq!(result.total, dec!(220.00));
        assert!(!result.minimum_applied);
    }

    #[test]
    fn test_unsupported_pairings_price_to_none() {
        assert!(price(&card(TransportMode::Road, ServiceKind::Freight), 1).is_none());
        assert!(price(&card(TransportMode::Sea, ServiceKind::LocalCharge), 1).is_none());
    }

    #[test]
    fn test_pricing_is_pure() {
        let card = card(TransportMode::Sea, ServiceKind::Freight);
        let first = price(&card, 2).unwrap();
        let second = price(&card, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_money_rounds_to_two_decimals() {
        let mut card = card(TransportMode::Sea, ServiceKind::Freight);
        card.freight = dec!(33.333);
        card.othc = dec!(0.005);
        let result = price(&card, 3).unwrap();
        assert_eq!(result.subtotal, dec!(100.00)); // 99.999 + 0.005
        match result.breakdown {
            ChargeSet::SeaFreight { freight_cost, .. } => {
                assert_eq!(freight_cost, dec!(100.00))
            }
            other => panic!("wrong breakdown shape: {other:?}"),
        }
    }
}
