use crate::booking::DateRange;
use serde::Serialize;
use time::Date;

/// Custom attribute keys on the cart line; fixed literals the store's cart
/// and order views display verbatim.
pub(crate) const CHECK_IN_KEY: &str = "チェックイン";
pub(crate) const CHECK_OUT_KEY: &str = "チェックアウト";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct Attribute {
    pub(crate) key: String,
    pub(crate) value: String,
}

/// One line of a cart lines-add request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CartLineInput {
    pub(crate) merchandise_id: String,
    pub(crate) quantity: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(crate) attributes: Vec<Attribute>,
}

/// The cart form submission payload for a lines-add action.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct LinesAddForm {
    action: &'static str,
    inputs: CartFormInputs,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
struct CartFormInputs {
    lines: Vec<CartLineInput>,
}

impl LinesAddForm {
    pub(crate) fn new(lines: Vec<CartLineInput>) -> LinesAddForm {
        LinesAddForm {
            action: "LinesAdd",
            inputs: CartFormInputs { lines },
        }
    }
}

fn booking_date(date: Date) -> String {
    format!(
        "{:04}/{:02}/{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Builds the cart line for a stay: quantity one, and the check-in/check-out
/// attributes only when the range is complete.
pub(crate) fn booking_line(merchandise_id: &str, range: DateRange) -> CartLineInput {
    let attributes = if let (Some(from), Some(to)) = (range.from, range.to) {
        vec![
            Attribute {
                key: CHECK_IN_KEY.to_owned(),
                value: booking_date(from),
            },
            Attribute {
                key: CHECK_OUT_KEY.to_owned(),
                value: booking_date(to),
            },
        ]
    } else {
        Vec::new()
    };
    CartLineInput {
        merchandise_id: merchandise_id.to_owned(),
        quantity: 1,
        attributes,
    }
}
