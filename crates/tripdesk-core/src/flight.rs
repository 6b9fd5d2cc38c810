//! # Flight Plan
//!
//! The flight-segment sub-form, modelled as a true sum type. Only the legs
//! of the active variant exist; there are no dormant fields for the other
//! variants that could be submitted by mistake.
//!
//! ## Variants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OneWay     { leg }                         1 leg                       │
//! │  RoundTrip  { outbound, inbound }           2 legs                      │
//! │  MultiCity  { segment1, segment2 }          2 legs                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Switching Variants
//! ```text
//! ┌──────────────┬──────────────┬──────────────────────────────────────────┐
//! │  from        │  to          │  legs after the switch                   │
//! ├──────────────┼──────────────┼──────────────────────────────────────────┤
//! │  any         │  OneWay      │  first leg                               │
//! │  2-leg       │  2-leg       │  both legs                               │
//! │  OneWay      │  RoundTrip   │  first leg + reverse route (no date)     │
//! │  OneWay      │  MultiCity   │  first leg + empty leg                   │
//! └──────────────┴──────────────┴──────────────────────────────────────────┘
//! ```
//!
//! Switching to OneWay drops the second leg. Nothing in fare computation
//! reads the flight plan, so switching never changes a total.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

// =============================================================================
// Flight Leg
// =============================================================================

/// One origin → destination hop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FlightLeg {
    /// Airport code, upper-cased.
    pub origin: String,
    /// Airport code, upper-cased.
    pub destination: String,
    #[ts(as = "Option<String>")]
    pub date: Option<NaiveDate>,
}

impl FlightLeg {
    /// Creates a leg, normalizing both airport codes.
    pub fn new(origin: &str, destination: &str, date: Option<NaiveDate>) -> Self {
        FlightLeg {
            origin: normalize_airport(origin),
            destination: normalize_airport(destination),
            date,
        }
    }

    /// The same route flown back, without a date.
    pub fn reversed(&self) -> Self {
        FlightLeg {
            origin: self.destination.clone(),
            destination: self.origin.clone(),
            date: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.origin.is_empty() && self.destination.is_empty() && self.date.is_none()
    }
}

fn normalize_airport(code: &str) -> String {
    code.trim().to_uppercase()
}

// =============================================================================
// Flight Plan Kind
// =============================================================================

/// The variant tag, used by the UI tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum FlightPlanKind {
    OneWay,
    RoundTrip,
    MultiCity,
}

impl FlightPlanKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FlightPlanKind::OneWay => "one-way",
            FlightPlanKind::RoundTrip => "round-trip",
            FlightPlanKind::MultiCity => "multi-city",
        }
    }

    pub const fn leg_count(&self) -> usize {
        match self {
            FlightPlanKind::OneWay => 1,
            FlightPlanKind::RoundTrip | FlightPlanKind::MultiCity => 2,
        }
    }
}

impl fmt::Display for FlightPlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightPlanKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "one-way" | "oneway" => Ok(FlightPlanKind::OneWay),
            "round-trip" | "roundtrip" => Ok(FlightPlanKind::RoundTrip),
            "multi-city" | "multicity" => Ok(FlightPlanKind::MultiCity),
            _ => Err(ValidationError::NotAllowed {
                field: "flightPlan".to_string(),
                allowed: vec![
                    "one-way".to_string(),
                    "round-trip".to_string(),
                    "multi-city".to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Flight Plan
// =============================================================================

/// The flight-segment data of an air-ticket invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FlightPlan {
    OneWay {
        leg: FlightLeg,
    },
    RoundTrip {
        outbound: FlightLeg,
        inbound: FlightLeg,
    },
    MultiCity {
        segment1: FlightLeg,
        segment2: FlightLeg,
    },
}

impl Default for FlightPlan {
    fn default() -> Self {
        FlightPlan::OneWay {
            leg: FlightLeg::default(),
        }
    }
}

impl FlightPlan {
    pub fn kind(&self) -> FlightPlanKind {
        match self {
            FlightPlan::OneWay { .. } => FlightPlanKind::OneWay,
            FlightPlan::RoundTrip { .. } => FlightPlanKind::RoundTrip,
            FlightPlan::MultiCity { .. } => FlightPlanKind::MultiCity,
        }
    }

    /// The active legs, in order.
    pub fn legs(&self) -> Vec<&FlightLeg> {
        match self {
            FlightPlan::OneWay { leg } => vec![leg],
            FlightPlan::RoundTrip { outbound, inbound } => vec![outbound, inbound],
            FlightPlan::MultiCity { segment1, segment2 } => vec![segment1, segment2],
        }
    }

    pub fn leg(&self, index: usize) -> Option<&FlightLeg> {
        self.legs().get(index).copied()
    }

    /// Switches to another variant. See the module table for what carries.
    ///
    /// ## Example
    /// ```rust
    /// use tripdesk_core::flight::{FlightLeg, FlightPlan, FlightPlanKind};
    ///
    /// let mut plan = FlightPlan::OneWay { leg: FlightLeg::new("dac", "cxb", None) };
    /// plan.switch_to(FlightPlanKind::RoundTrip);
    ///
    /// assert_eq!(plan.leg(1).unwrap().origin, "CXB");
    /// assert_eq!(plan.leg(1).unwrap().destination, "DAC");
    /// ```
    pub fn switch_to(&mut self, kind: FlightPlanKind) {
        if self.kind() == kind {
            return;
        }

        let (first, second) = match std::mem::take(self) {
            FlightPlan::OneWay { leg } => (leg, None),
            FlightPlan::RoundTrip { outbound, inbound } => (outbound, Some(inbound)),
            FlightPlan::MultiCity { segment1, segment2 } => (segment1, Some(segment2)),
        };

        *self = match kind {
            FlightPlanKind::OneWay => FlightPlan::OneWay { leg: first },
            FlightPlanKind::RoundTrip => {
                let inbound = second.unwrap_or_else(|| first.reversed());
                FlightPlan::RoundTrip {
                    outbound: first,
                    inbound,
                }
            }
            FlightPlanKind::MultiCity => FlightPlan::MultiCity {
                segment1: first,
                segment2: second.unwrap_or_default(),
            },
        };
    }

    /// Replaces leg `index` (0 or 1) of the active variant.
    ///
    /// Airport codes are normalized on the way in.
    pub fn set_leg(&mut self, index: usize, leg: FlightLeg) -> CoreResult<()> {
        let normalized = FlightLeg::new(&leg.origin, &leg.destination, leg.date);
        let kind = self.kind();

        let slot = match (self, index) {
            (FlightPlan::OneWay { leg: only }, 0) => only,
            (FlightPlan::RoundTrip { outbound, .. }, 0) => outbound,
            (FlightPlan::RoundTrip { inbound, .. }, 1) => inbound,
            (FlightPlan::MultiCity { segment1, .. }, 0) => segment1,
            (FlightPlan::MultiCity { segment2, .. }, 1) => segment2,
            _ => {
                return Err(CoreError::LegNotAvailable {
                    kind: kind.to_string(),
                    index,
                })
            }
        };

        *slot = normalized;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_leg_normalizes_airport_codes() {
        let leg = FlightLeg::new(" dac ", "cxb", None);
        assert_eq!(leg.origin, "DAC");
        assert_eq!(leg.destination, "CXB");
    }

    #[test]
    fn test_default_is_empty_one_way() {
        let plan = FlightPlan::default();
        assert_eq!(plan.kind(), FlightPlanKind::OneWay);
        assert_eq!(plan.legs().len(), 1);
        assert!(plan.legs()[0].is_empty());
    }

    #[test]
    fn test_one_way_to_round_trip_seeds_return_leg() {
        let mut plan = FlightPlan::OneWay {
            leg: FlightLeg::new("DAC", "DXB", date(2026, 3, 1)),
        };
        plan.switch_to(FlightPlanKind::RoundTrip);

        assert_eq!(plan.kind(), FlightPlanKind::RoundTrip);
        assert_eq!(plan.leg(0), Some(&FlightLeg::new("DAC", "DXB", date(2026, 3, 1))));
        assert_eq!(plan.leg(1), Some(&FlightLeg::new("DXB", "DAC", None)));
    }

    #[test]
    fn test_one_way_to_multi_city_adds_empty_leg() {
        let mut plan = FlightPlan::OneWay {
            leg: FlightLeg::new("DAC", "DXB", None),
        };
        plan.switch_to(FlightPlanKind::MultiCity);

        assert_eq!(plan.leg(0).unwrap().destination, "DXB");
        assert!(plan.leg(1).unwrap().is_empty());
    }

    #[test]
    fn test_two_leg_switch_carries_both_legs() {
        let mut plan = FlightPlan::RoundTrip {
            outbound: FlightLeg::new("DAC", "BKK", date(2026, 5, 2)),
            inbound: FlightLeg::new("BKK", "DAC", date(2026, 5, 9)),
        };
        plan.switch_to(FlightPlanKind::MultiCity);

        match &plan {
            FlightPlan::MultiCity { segment1, segment2 } => {
                assert_eq!(segment1.destination, "BKK");
                assert_eq!(segment2.date, date(2026, 5, 9));
            }
            other => panic!("unexpected plan: {:?}", other),
        }
    }

    #[test]
    fn test_switch_to_one_way_drops_second_leg() {
        let mut plan = FlightPlan::MultiCity {
            segment1: FlightLeg::new("DAC", "KUL", None),
            segment2: FlightLeg::new("KUL", "SIN", None),
        };
        plan.switch_to(FlightPlanKind::OneWay);

        assert_eq!(plan.legs().len(), 1);
        assert_eq!(plan.leg(0).unwrap().destination, "KUL");
        assert_eq!(plan.leg(1), None);
    }

    #[test]
    fn test_switch_to_same_kind_is_noop() {
        let mut plan = FlightPlan::RoundTrip {
            outbound: FlightLeg::new("DAC", "BKK", None),
            inbound: FlightLeg::default(),
        };
        let before = plan.clone();
        plan.switch_to(FlightPlanKind::RoundTrip);
        assert_eq!(plan, before);
    }

    #[test]
    fn test_set_leg_rejects_missing_index() {
        let mut plan = FlightPlan::default();
        let err = plan.set_leg(1, FlightLeg::new("DAC", "CGP", None)).unwrap_err();
        assert!(matches!(err, CoreError::LegNotAvailable { index: 1, .. }));

        let mut plan = FlightPlan::RoundTrip {
            outbound: FlightLeg::default(),
            inbound: FlightLeg::default(),
        };
        assert!(plan.set_leg(2, FlightLeg::default()).is_err());
    }

    #[test]
    fn test_set_leg_normalizes() {
        let mut plan = FlightPlan::default();
        plan.set_leg(0, FlightLeg {
            origin: " dac".to_string(),
            destination: "zyl ".to_string(),
            date: None,
        })
        .unwrap();
        assert_eq!(plan.leg(0).unwrap().origin, "DAC");
        assert_eq!(plan.leg(0).unwrap().destination, "ZYL");
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("round_trip".parse::<FlightPlanKind>().unwrap(), FlightPlanKind::RoundTrip);
        assert_eq!("Multi-City".parse::<FlightPlanKind>().unwrap(), FlightPlanKind::MultiCity);
        assert!("return".parse::<FlightPlanKind>().is_err());
    }

    #[test]
    fn test_serialized_tag() {
        let json = serde_json::to_value(FlightPlan::default()).unwrap();
        assert_eq!(json["kind"], "one-way");
        assert_eq!(json["leg"]["origin"], "");
    }
}
