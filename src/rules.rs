//! Selector table for the results page.
//!
//! The class names below come out of the search site's CSS build and change
//! without notice. When extraction starts returning sentinels, this is the
//! only file that should need updating.

/// Marks one rendered flight row.
pub const ROW_SELECTOR: &str = ".app-components-Shopping-GridItem-styles__flightRow--QbVXL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    DepartureTime,
    ArrivalTime,
    Duration,
    Price,
}

/// Where to find one field inside a row, and what to record when it is missing.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionRule {
    pub field: Field,
    pub selector: &'static str,
    pub sentinel: &'static str,
}

/// Applied to each row in this order.
pub static RULES: [ExtractionRule; 4] = [
    ExtractionRule {
        field: Field::DepartureTime,
        selector: "div.app-components-Shopping-FlightInfoBlock-styles__departTime--cDBWt \
                   span.app-components-Shopping-FlightInfoBlock-styles__time--CaNGp",
        sentinel: "No departure time found",
    },
    ExtractionRule {
        field: Field::ArrivalTime,
        selector: "div.app-components-Shopping-FlightInfoBlock-styles__arrivalTime--AXo5U \
                   span[class*='time--CaNGp']",
        sentinel: "No arrival time found",
    },
    ExtractionRule {
        field: Field::Duration,
        selector: "div.app-components-Shopping-FlightInfoBlock-styles__duration--P3ZXi \
                   span[aria-hidden='true']",
        sentinel: "No duration found",
    },
    ExtractionRule {
        field: Field::Price,
        selector: "div[class*='btnPriceValue'] span span",
        sentinel: "No price found",
    },
];

impl Field {
    pub fn rule(self) -> &'static ExtractionRule {
        match self {
            Field::DepartureTime => &RULES[0],
            Field::ArrivalTime => &RULES[1],
            Field::Duration => &RULES[2],
            Field::Price => &RULES[3],
        }
    }

    pub fn sentinel(self) -> &'static str {
        self.rule().sentinel
    }
}
