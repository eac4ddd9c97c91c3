mod averages;
pub mod views;

pub use averages::{standard_averages, AverageSalaryTable};
pub use views::{
    full_comparison, history_rows, latest_comparison, ComparisonRow, HistoryRow, SalaryKind,
};

pub const LATEST_COMPARISON_TITLE: &str = "Predicted vs Average Salary by Job Title";
pub const FULL_COMPARISON_TITLE: &str = "Experience vs Salary Comparison (Full History)";

/// Formats an amount with comma thousands separators (`812345` -> `812,345`).
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(digit);
    }
    formatted
}
