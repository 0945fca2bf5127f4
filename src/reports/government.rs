//! Government-wide spending report: paid bills, office materials and
//! strategic resources, each filtered by its own date column.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

use super::DateRange;
use crate::entities::{office_materials, paid_bills, strategic_resources};

#[derive(Debug, Serialize)]
pub struct BillTotals {
    pub total: Decimal,
    pub by_category: BTreeMap<String, Decimal>,
    pub items: Vec<paid_bills::Model>,
}

#[derive(Debug, Serialize)]
pub struct MaterialTotals {
    pub item_count: usize,
    /// Sum of unit price x quantity; entries without a price count as zero.
    pub total_value: Decimal,
    pub items: Vec<office_materials::Model>,
}

#[derive(Debug, Serialize)]
pub struct ResourceTotals {
    pub item_count: usize,
    /// Sum of declared values; entries without one count as zero.
    pub total_value: Decimal,
    pub items: Vec<strategic_resources::Model>,
}

#[derive(Debug, Serialize)]
pub struct GovernmentSummary {
    pub bills: BillTotals,
    pub materials: MaterialTotals,
    pub resources: ResourceTotals,
}

/// Total value of one material line item.
#[must_use]
pub fn material_total(material: &office_materials::Model) -> Decimal {
    material.unit_price.unwrap_or(Decimal::ZERO) * Decimal::from(material.quantity)
}

/// Aggregate the three ledgers over the same optional window. Bills filter on
/// payment date, materials on entry date, resources on arrival date.
#[must_use]
pub fn government_summary(
    bills: &[paid_bills::Model],
    materials: &[office_materials::Model],
    resources: &[strategic_resources::Model],
    range: &DateRange,
) -> GovernmentSummary {
    let bills: Vec<paid_bills::Model> = bills
        .iter()
        .filter(|b| range.contains(b.payment_date))
        .cloned()
        .collect();

    let mut by_category: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut total = Decimal::ZERO;
    for bill in &bills {
        *by_category.entry(bill.category.clone()).or_default() += bill.amount;
        total += bill.amount;
    }

    let materials: Vec<office_materials::Model> = materials
        .iter()
        .filter(|m| range.contains(m.entry_date))
        .cloned()
        .collect();
    let materials_value = materials.iter().map(material_total).sum();

    let resources: Vec<strategic_resources::Model> = resources
        .iter()
        .filter(|r| range.contains(r.arrival_date))
        .cloned()
        .collect();
    let resources_value = resources
        .iter()
        .map(|r| r.value.unwrap_or(Decimal::ZERO))
        .sum();

    GovernmentSummary {
        bills: BillTotals {
            total,
            by_category,
            items: bills,
        },
        materials: MaterialTotals {
            item_count: materials.len(),
            total_value: materials_value,
            items: materials,
        },
        resources: ResourceTotals {
            item_count: resources.len(),
            total_value: resources_value,
            items: resources,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bill(id: i32, category: &str, amount: Decimal, paid: NaiveDate) -> paid_bills::Model {
        paid_bills::Model {
            id,
            category: category.to_string(),
            reference_month: format!("{}", paid.format("%Y-%m")),
            amount,
            payment_date: paid,
            receipt_file: None,
            notes: None,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn material(
        id: i32,
        quantity: i32,
        unit_price: Option<Decimal>,
        entry: NaiveDate,
    ) -> office_materials::Model {
        office_materials::Model {
            id,
            name: format!("Material {id}"),
            description: None,
            quantity,
            unit: None,
            supplier: None,
            entry_date: entry,
            unit_price,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn resource(id: i32, value: Option<Decimal>, arrival: NaiveDate) -> strategic_resources::Model {
        strategic_resources::Model {
            id,
            name: format!("Resource {id}"),
            description: "strategic".to_string(),
            quantity: 1,
            arrival_date: arrival,
            destination: None,
            supplier: None,
            value,
            status: "received".to_string(),
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_bill_totals_and_category_split() {
        let bills = vec![
            bill(1, "energia", dec!(2500.00), date(2026, 8, 1)),
            bill(2, "agua", dec!(800.00), date(2026, 8, 3)),
        ];
        let summary = government_summary(&bills, &[], &[], &DateRange::default());

        assert_eq!(summary.bills.total, dec!(3300.00));
        assert_eq!(summary.bills.by_category["energia"], dec!(2500.00));
        assert_eq!(summary.bills.by_category["agua"], dec!(800.00));
        assert_eq!(summary.bills.items.len(), 2);
    }

    #[test]
    fn test_repeated_categories_accumulate() {
        let bills = vec![
            bill(1, "internet", dec!(120.50), date(2026, 7, 1)),
            bill(2, "internet", dec!(120.50), date(2026, 8, 1)),
        ];
        let summary = government_summary(&bills, &[], &[], &DateRange::default());
        assert_eq!(summary.bills.by_category["internet"], dec!(241.00));
    }

    #[test]
    fn test_material_value_treats_missing_price_as_zero() {
        let materials = vec![
            material(1, 10, Some(dec!(3.25)), date(2026, 8, 1)),
            material(2, 99, None, date(2026, 8, 2)),
        ];
        let summary = government_summary(&[], &materials, &[], &DateRange::default());
        assert_eq!(summary.materials.item_count, 2);
        assert_eq!(summary.materials.total_value, dec!(32.50));
    }

    #[test]
    fn test_resource_value_treats_missing_as_zero() {
        let resources = vec![
            resource(1, Some(dec!(15000.00)), date(2026, 8, 1)),
            resource(2, None, date(2026, 8, 2)),
        ];
        let summary = government_summary(&[], &[], &resources, &DateRange::default());
        assert_eq!(summary.resources.item_count, 2);
        assert_eq!(summary.resources.total_value, dec!(15000.00));
    }

    #[test]
    fn test_each_ledger_filters_by_its_own_date() {
        let range = DateRange::new(Some(date(2026, 8, 1)), Some(date(2026, 8, 31)));
        let bills = vec![
            bill(1, "energia", dec!(100.00), date(2026, 7, 31)),
            bill(2, "energia", dec!(200.00), date(2026, 8, 15)),
        ];
        let materials = vec![
            material(1, 1, Some(dec!(5.00)), date(2026, 6, 1)),
            material(2, 1, Some(dec!(7.00)), date(2026, 8, 20)),
        ];
        let resources = vec![resource(1, Some(dec!(50.00)), date(2026, 9, 1))];

        let summary = government_summary(&bills, &materials, &resources, &range);
        assert_eq!(summary.bills.total, dec!(200.00));
        assert_eq!(summary.materials.total_value, dec!(7.00));
        assert_eq!(summary.resources.item_count, 0);
    }
}
