//! Salary to rent affordability calculator.

use crate::models::ParseOptionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const FOOD_SHARE: f64 = 0.20;
const TRANSPORT_SHARE: f64 = 0.08;
const BUFFER_SHARE: f64 = 0.05;

/// Largest monthly salary considered; larger inputs are treated as this
pub const MAX_SALARY: u64 = 1_000_000_000;

/// How much of the salary the visitor is willing to put into rent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifestyle {
    Lean,
    #[default]
    Balanced,
    Comfortable,
}

impl Lifestyle {
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Lean => 0.25,
            Self::Balanced => 0.33,
            Self::Comfortable => 0.42,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lean => "lean",
            Self::Balanced => "balanced",
            Self::Comfortable => "comfortable",
        }
    }
}

impl fmt::Display for Lifestyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Lifestyle {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lean" => Ok(Self::Lean),
            "balanced" => Ok(Self::Balanced),
            "comfortable" => Ok(Self::Comfortable),
            _ => Err(ParseOptionError::new("lifestyle", s)),
        }
    }
}

/// Monthly budget split, all amounts in rupees
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Affordability {
    pub max_rent: i64,
    pub food: i64,
    pub transport: i64,
    /// Negative when rent plus fixed costs exceed the salary
    pub savings: i64,
    pub misc: i64,
    pub rent_pct: i64,
    pub food_pct: i64,
    pub save_pct: i64,
    pub recommendation: &'static str,
}

/// Rounds .5 upwards, also for negative values
fn round_half_up(x: f64) -> i64 {
    (x + 0.5).floor() as i64
}

fn pct(part: i64, salary: f64) -> i64 {
    if salary <= 0.0 {
        return 0;
    }
    round_half_up(part as f64 / salary * 100.0)
}

fn recommend(max_rent: i64) -> &'static str {
    match max_rent {
        r if r < 20_000 => "Best options: 1 BHK in Borivali East/West",
        r if r < 35_000 => "Good fit: 1 BHK in Kandivali or Malad East",
        r if r < 50_000 => "Ideal for: 2 BHK semi-furnished in Malad/Kandivali West",
        _ => "Premium pick: 2–3 BHK furnished in Malad West or Kandivali West",
    }
}

pub fn affordability(salary: u64, lifestyle: Lifestyle) -> Affordability {
    let salary = salary.min(MAX_SALARY);
    let s = salary as f64;
    let ratio = lifestyle.ratio();

    let max_rent = round_half_up(s * ratio / 1000.0) * 1000;
    let food = round_half_up(s * FOOD_SHARE);
    let transport = round_half_up(s * TRANSPORT_SHARE);
    let savings = round_half_up(s * (1.0 - ratio - FOOD_SHARE - TRANSPORT_SHARE - BUFFER_SHARE));
    let misc = salary as i64 - max_rent - food - transport - savings.max(0);

    Affordability {
        max_rent,
        food,
        transport,
        savings,
        misc,
        rent_pct: pct(max_rent, s),
        food_pct: pct(food, s),
        save_pct: pct(savings, s).max(0),
        recommendation: recommend(max_rent),
    }
}
