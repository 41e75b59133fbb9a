use super::*;

#[test]
fn export_filename_uses_date_part_of_timestamp() {
    assert_eq!(export_filename("2024-05-17T08:30:00.000Z"), "expenses_2024-05-17.csv");
}

#[test]
fn export_filename_accepts_bare_date() {
    assert_eq!(export_filename("2024-05-17"), "expenses_2024-05-17.csv");
}

#[cfg(not(feature = "csr"))]
#[test]
fn save_text_needs_a_browser() {
    assert!(save_text("a.csv", "text/csv", "x").is_err());
}
