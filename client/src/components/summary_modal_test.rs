use super::*;

#[test]
fn totals_sort_largest_first() {
    let totals = BTreeMap::from([
        ("Food".to_owned(), 300.0),
        ("Travel".to_owned(), 1200.0),
        ("Bills".to_owned(), 300.0),
    ]);
    let rows = sorted_totals(&totals);
    let names: Vec<&str> = rows.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Travel", "Bills", "Food"]);
}

#[test]
fn empty_totals_give_no_rows() {
    assert!(sorted_totals(&BTreeMap::new()).is_empty());
}
