//! Static tariff tables for the two shipping lanes into Accra.
//!
//! The tables are read-only: the prompt builder formats them into grounding
//! context and the tariff view renders them.

/// One row of a rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TariffItem {
    /// Weight band label as shown to customers, e.g. `"2.1 - 4kg"`.
    pub weight: &'static str,
    /// Price in the region's currency, whole units.
    pub price: u32,
}

const fn item(weight: &'static str, price: u32) -> TariffItem {
    TariffItem { weight, price }
}

/// UK to Ghana, GBP per KG.
pub const TARIFFS_UK: &[TariffItem] = &[
    item("0 - 2kg", 30),
    item("2.1 - 4kg", 60),
    item("4.1 - 6kg", 80),
    item("6.1 - 8kg", 105),
    item("8.1 - 10kg", 130),
    item("10.1 - 12kg", 155),
    item("12.1 - 14kg", 170),
    item("14.1 - 16kg", 195),
    item("16.1 - 18kg", 220),
    item("18.1 - 20kg", 235),
    item("20.1 - 23kg", 250),
];

/// USA to Ghana, USD per LB.
pub const TARIFFS_USA: &[TariffItem] = &[
    item("0 - 5 lbs", 45),
    item("5.1 - 10 lbs", 85),
    item("10.1 - 15 lbs", 120),
    item("15.1 - 20 lbs", 155),
    item("20.1 - 25 lbs", 190),
    item("25.1 - 30 lbs", 220),
    item("30.1 - 40 lbs", 280),
    item("40.1 - 50 lbs", 340),
];

/// A stage of the shipping process, in the order customers go through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStep {
    pub title: &'static str,
    pub description: &'static str,
}

pub const HOW_IT_WORKS: &[ProcessStep] = &[
    ProcessStep {
        title: "Pick a Drop Date",
        description: "We have specific dates each month for UK & USA to Accra shipments, typically scheduled multiple times monthly.",
    },
    ProcessStep {
        title: "Get Your Address",
        description: "Confirm your drop date to receive our secure UK or USA warehouse address for your online orders.",
    },
    ProcessStep {
        title: "Process & Re-pack",
        description: "We consolidate your packages, ensuring they are professionally handled and ready for international transit.",
    },
    ProcessStep {
        title: "Final Delivery",
        description: "Collect your items in Ghana the day after arrival or opt for doorstep delivery at a small fee.",
    },
];

/// Customer contact channels.
pub const CONTACT_PHONE: &str = "+233 50 389 0000";
pub const CONTACT_INSTAGRAM: &str = "@p2plogisticsgh";

/// Origin region of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Region {
    #[default]
    Uk,
    Usa,
}

impl Region {
    /// Returns all regions in display order.
    pub const fn all() -> &'static [Region] {
        &[Region::Uk, Region::Usa]
    }

    /// The rate table for this region.
    pub const fn tariffs(&self) -> &'static [TariffItem] {
        match self {
            Region::Uk => TARIFFS_UK,
            Region::Usa => TARIFFS_USA,
        }
    }

    pub const fn currency_symbol(&self) -> &'static str {
        match self {
            Region::Uk => "£",
            Region::Usa => "$",
        }
    }

    pub const fn currency_code(&self) -> &'static str {
        match self {
            Region::Uk => "GBP",
            Region::Usa => "USD",
        }
    }

    /// Weight unit the region's table is priced in.
    pub const fn unit(&self) -> &'static str {
        match self {
            Region::Uk => "KG",
            Region::Usa => "LBS",
        }
    }

    /// Warehouse location.
    pub const fn origin(&self) -> &'static str {
        match self {
            Region::Uk => "London",
            Region::Usa => "New Jersey",
        }
    }

    /// Label for the region toggle.
    pub const fn label(&self) -> &'static str {
        match self {
            Region::Uk => "UK to Ghana",
            Region::Usa => "USA to Ghana",
        }
    }

    pub const fn rate_basis(&self) -> &'static str {
        match self {
            Region::Uk => "UK rates are calculated per KG.",
            Region::Usa => "USA rates are calculated per LB.",
        }
    }

    /// The other region. There are only two lanes, so the toggle is a flip.
    pub const fn toggled(&self) -> Region {
        match self {
            Region::Uk => Region::Usa,
            Region::Usa => Region::Uk,
        }
    }

    /// Format a price with this region's currency symbol.
    pub fn format_price(&self, price: u32) -> String {
        format!("{}{}", self.currency_symbol(), price)
    }
}
