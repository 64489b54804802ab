use crate::schema::ProfitRecord;
use indexmap::IndexMap;

/// Merges the allocation-level profit records of a reconciliation pass into
/// one record per product, in first-emission order.
///
/// Conservation holds exactly: the sums of `quantity` and `profit` over the
/// output equal the sums over the input.
pub fn consolidate(records: Vec<ProfitRecord>) -> Vec<ProfitRecord> {
    let mut merged: IndexMap<String, ProfitRecord> = IndexMap::with_capacity(records.len());

    for record in records {
        match merged.entry(record.name.clone()) {
            indexmap::map::Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.quantity += record.quantity;
                existing.profit += record.profit;
            }
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(record);
            }
        }
    }

    merged.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums(records: &[ProfitRecord]) -> (i64, i64) {
        (
            records.iter().map(|r| r.quantity).sum(),
            records.iter().map(|r| r.profit).sum(),
        )
    }

    #[test]
    fn test_empty_input() {
        assert!(consolidate(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_record_is_unchanged() {
        let records = vec![ProfitRecord::new("Widget", 10, 20)];
        assert_eq!(consolidate(records.clone()), records);
    }

    #[test]
    fn test_duplicates_merge_into_one_entry_per_product() {
        let records = vec![
            ProfitRecord::new("Widget", 10, 8),
            ProfitRecord::new("Gadget", 2, 14),
            ProfitRecord::new("Widget", 6, 6),
            ProfitRecord::new("Widget", 1, -3),
        ];

        let merged = consolidate(records);

        assert_eq!(
            merged,
            vec![
                ProfitRecord::new("Widget", 17, 11),
                ProfitRecord::new("Gadget", 2, 14),
            ]
        );
    }

    #[test]
    fn test_first_emission_order_is_preserved() {
        let records = vec![
            ProfitRecord::new("C", 1, 1),
            ProfitRecord::new("A", 1, 1),
            ProfitRecord::new("B", 1, 1),
            ProfitRecord::new("A", 1, 1),
        ];

        let names: Vec<String> = consolidate(records).into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_conservation_of_quantity_and_profit() {
        let records = vec![
            ProfitRecord::new("Widget", 10, 8),
            ProfitRecord::new("Widget", 6, 6),
            ProfitRecord::new("Gadget", 2, -5),
            ProfitRecord::new("Tripod", 3, 0),
            ProfitRecord::new("Gadget", 4, 9),
        ];

        let before = sums(&records);
        let merged = consolidate(records);
        let after = sums(&merged);

        assert_eq!(before, after);

        let mut names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), merged.len(), "no product may appear twice");
    }
}
