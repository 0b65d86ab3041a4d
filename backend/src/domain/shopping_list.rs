//! Shopping-list aggregation over the ingredients of carted recipes.
//!
//! Storage hands over one row per (carted recipe, ingredient) pair. Rows are
//! grouped by ingredient name and measurement unit and their amounts summed.
//! A group keeps the position of its first row, so output order follows
//! storage order.

use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

use super::Amount;

/// One ingredient requirement of one carted recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartIngredientRow {
    /// Ingredient name; half of the grouping key.
    pub name: String,
    /// Unit the amount is expressed in; the other half of the grouping key.
    pub measurement_unit: String,
    /// Quantity this recipe calls for.
    pub amount: Amount,
}

/// Summed requirement for one (name, unit) group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShoppingListLine {
    pub name: String,
    pub measurement_unit: String,
    pub total: u64,
}

/// Aggregated shopping list.
///
/// # Examples
/// ```
/// use foodgram::domain::{Amount, CartIngredientRow, ShoppingList};
///
/// let row = |name: &str, amount| CartIngredientRow {
///     name: name.to_owned(),
///     measurement_unit: "g".to_owned(),
///     amount: Amount::new(amount).unwrap(),
/// };
/// let list = ShoppingList::aggregate([row("flour", 200), row("sugar", 50), row("flour", 100)]);
/// assert_eq!(list.lines()[0].total, 300);
/// assert_eq!(list.lines().len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ShoppingList {
    lines: Vec<ShoppingListLine>,
}

impl ShoppingList {
    /// Group rows by (name, unit) and sum their amounts.
    pub fn aggregate(rows: impl IntoIterator<Item = CartIngredientRow>) -> Self {
        let mut positions: HashMap<(String, String), usize> = HashMap::new();
        let mut lines: Vec<ShoppingListLine> = Vec::new();
        for row in rows {
            let amount = u64::from(row.amount.get());
            let key = (row.name, row.measurement_unit);
            match positions.get(&key).and_then(|&at| lines.get_mut(at)) {
                Some(line) => line.total += amount,
                None => {
                    positions.insert(key.clone(), lines.len());
                    let (name, measurement_unit) = key;
                    lines.push(ShoppingListLine {
                        name,
                        measurement_unit,
                        total: amount,
                    });
                }
            }
        }
        Self { lines }
    }

    /// Lines in first-seen order.
    pub fn lines(&self) -> &[ShoppingListLine] {
        &self.lines
    }

    /// True when no carted recipe contributed a line.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Plain-text rendering offered as a download.
    pub fn render_text(&self) -> String {
        let mut out = String::from("Shopping list\n\n");
        if self.lines.is_empty() {
            out.push_str("Your shopping cart is empty.\n");
            return out;
        }
        for line in &self.lines {
            out.push_str(&format!(
                "{} ({}) - {}\n",
                line.name, line.measurement_unit, line.total
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row(name: &str, unit: &str, amount: u32) -> CartIngredientRow {
        CartIngredientRow {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
            amount: Amount::new(amount).expect("positive amount"),
        }
    }

    fn line(name: &str, unit: &str, total: u64) -> ShoppingListLine {
        ShoppingListLine {
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
            total,
        }
    }

    #[rstest]
    fn shared_ingredient_with_same_unit_is_summed() {
        let list = ShoppingList::aggregate([row("flour", "g", 200), row("flour", "g", 150)]);
        assert_eq!(list.lines(), &[line("flour", "g", 350)]);
    }

    #[rstest]
    fn same_name_different_unit_stays_separate() {
        let list = ShoppingList::aggregate([row("milk", "ml", 200), row("milk", "cup", 1)]);
        assert_eq!(
            list.lines(),
            &[line("milk", "ml", 200), line("milk", "cup", 1)]
        );
    }

    #[rstest]
    fn groups_keep_first_seen_position() {
        let list = ShoppingList::aggregate([
            row("eggs", "pcs", 2),
            row("flour", "g", 100),
            row("eggs", "pcs", 3),
            row("salt", "pinch", 1),
        ]);
        assert_eq!(
            list.lines(),
            &[
                line("eggs", "pcs", 5),
                line("flour", "g", 100),
                line("salt", "pinch", 1),
            ]
        );
    }

    #[rstest]
    fn large_amounts_do_not_overflow() {
        let max = i32::MAX as u32;
        let list = ShoppingList::aggregate([row("rice", "g", max), row("rice", "g", max)]);
        assert_eq!(list.lines(), &[line("rice", "g", 2 * u64::from(max))]);
    }

    #[rstest]
    fn empty_cart_yields_empty_list() {
        let list = ShoppingList::aggregate(Vec::new());
        assert!(list.is_empty());
        assert_eq!(
            list.render_text(),
            "Shopping list\n\nYour shopping cart is empty.\n"
        );
    }

    #[rstest]
    fn renders_one_line_per_group() {
        let list = ShoppingList::aggregate([row("flour", "g", 200), row("sugar", "g", 50)]);
        assert_eq!(
            list.render_text(),
            "Shopping list\n\nflour (g) - 200\nsugar (g) - 50\n"
        );
    }
}
