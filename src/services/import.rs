//! Bulk import of income and expense lines
//!
//! Input is line-oriented text, one entry per line, columns by position:
//! `type, category, amount[, note]`. Commas and semicolons both separate
//! fields; a double quote toggles quoted mode in which separators are kept
//! as text. Quote characters are dropped, never escaped.
//!
//! Line numbers are 1-based and count blank lines, so an error message
//! always points at the physical line in the source.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::ImportMode;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, MoneyParseError, TransactionType, Wallet, MAX_AMOUNT};

use super::LedgerService;

/// One validated import line, not yet applied
#[derive(Debug, Clone, PartialEq)]
struct ImportRow {
    kind: TransactionType,
    category: String,
    amount: Money,
    note: String,
}

/// Service for importing entries into a wallet
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportService {
    ledger: LedgerService,
    mode: ImportMode,
}

impl ImportService {
    /// Create an import service with the given failure mode
    pub fn new(mode: ImportMode) -> Self {
        Self {
            ledger: LedgerService::new(),
            mode,
        }
    }

    /// Import entries from a file
    ///
    /// A missing file is a validation failure; a file that exists but can't
    /// be read is an I/O failure.
    pub fn import_file(&self, wallet: &mut Wallet, path: &Path) -> LedgerResult<usize> {
        if path.as_os_str().is_empty() {
            return Err(LedgerError::Validation("Import file path is required".into()));
        }
        if !path.exists() {
            return Err(LedgerError::Validation(format!(
                "Import file not found: {}",
                path.display()
            )));
        }

        let file = File::open(path).map_err(|e| {
            LedgerError::Io(format!("Failed to open {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "importing file");
        self.import_reader(wallet, BufReader::new(file))
    }

    /// Import entries from any buffered reader
    ///
    /// The whole input is read before any line is applied, so a read error
    /// never leaves a partial import behind.
    pub fn import_reader<R: BufRead>(&self, wallet: &mut Wallet, reader: R) -> LedgerResult<usize> {
        let lines = reader
            .lines()
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| LedgerError::Io(format!("Failed to read import data: {}", e)))?;
        self.import_lines(wallet, &lines)
    }

    /// Import entries from a sequence of lines
    ///
    /// Returns the number of entries imported. The first invalid line stops
    /// the import with a line-numbered error. In `Incremental` mode the lines
    /// before it stay applied; in `AllOrNothing` mode nothing is applied.
    pub fn import_lines<I, S>(&self, wallet: &mut Wallet, lines: I) -> LedgerResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut staged = Vec::new();
        let mut imported = 0;
        let mut seen_data = false;

        for (index, raw) in lines.into_iter().enumerate() {
            let line_number = index + 1;
            let line = raw.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            let fields = split_fields(line);
            let first = !seen_data;
            seen_data = true;
            if first && is_header(&fields) {
                debug!(line_number, "skipping header row");
                continue;
            }

            let row = match parse_row(line_number, &fields) {
                Ok(row) => row,
                Err(e) => {
                    warn!(
                        line_number,
                        applied = imported,
                        mode = ?self.mode,
                        "import stopped at invalid line"
                    );
                    return Err(e);
                }
            };

            match self.mode {
                ImportMode::Incremental => {
                    self.apply(wallet, row)?;
                    imported += 1;
                }
                ImportMode::AllOrNothing => staged.push(row),
            }
        }

        for row in staged {
            self.apply(wallet, row)?;
            imported += 1;
        }

        info!(imported, mode = ?self.mode, "import completed");
        Ok(imported)
    }

    fn apply(&self, wallet: &mut Wallet, row: ImportRow) -> LedgerResult<()> {
        match row.kind {
            TransactionType::Income => {
                self.ledger
                    .add_income(wallet, &row.category, row.amount, &row.note)?;
            }
            _ => {
                self.ledger
                    .add_expense(wallet, &row.category, row.amount, &row.note)?;
            }
        }
        Ok(())
    }
}

/// Split a line on `,` or `;`, honoring double-quoted sections
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            ',' | ';' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

fn is_header(fields: &[String]) -> bool {
    fields.len() >= 3
        && fields[0].trim().eq_ignore_ascii_case("type")
        && fields[1].trim().eq_ignore_ascii_case("category")
        && fields[2].trim().eq_ignore_ascii_case("amount")
}

fn parse_row(line_number: usize, fields: &[String]) -> LedgerResult<ImportRow> {
    if fields.len() < 3 {
        return Err(LedgerError::import(
            line_number,
            "expected at least three columns: type, category, amount",
        ));
    }

    let kind = match fields[0].trim().to_uppercase().as_str() {
        "INCOME" => TransactionType::Income,
        "EXPENSE" => TransactionType::Expense,
        other => {
            return Err(LedgerError::import(
                line_number,
                format!("type must be INCOME or EXPENSE, got '{}'", other),
            ))
        }
    };

    let raw_amount = fields[2].trim();
    let amount = match Money::parse(raw_amount) {
        Ok(amount) if amount.is_positive() => amount,
        Err(MoneyParseError::OutOfRange(_)) => {
            return Err(LedgerError::import(
                line_number,
                format!("amount exceeds the maximum of {}, got '{}'", MAX_AMOUNT, raw_amount),
            ))
        }
        _ => {
            return Err(LedgerError::import(
                line_number,
                format!("amount must be a positive number, got '{}'", raw_amount),
            ))
        }
    };

    let note = fields
        .get(3)
        .map(|n| n.replace('"', "").trim().to_string())
        .unwrap_or_default();

    Ok(ImportRow {
        kind,
        category: fields[1].trim().to_string(),
        amount,
        note,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn service() -> ImportService {
        ImportService::new(ImportMode::Incremental)
    }

    #[test]
    fn test_split_fields() {
        assert_eq!(split_fields("a,b;c"), vec!["a", "b", "c"]);
        assert_eq!(
            split_fields("EXPENSE,Food,\"1,5\",\"Lunch; with friends\""),
            vec!["EXPENSE", "Food", "1,5", "Lunch; with friends"]
        );
        assert_eq!(split_fields("a,,b"), vec!["a", "", "b"]);
        assert_eq!(split_fields("single"), vec!["single"]);
    }

    #[test]
    fn test_import_income_and_expense() {
        let mut wallet = Wallet::new();
        let lines = ["INCOME,Salary,1000,Monthly pay", "EXPENSE,Food,250,Lunch"];

        let imported = service().import_lines(&mut wallet, lines).unwrap();

        assert_eq!(imported, 2);
        assert_eq!(wallet.balance().to_string(), "750.00");
        assert_eq!(wallet.transactions()[0].note, "Monthly pay");
        assert_eq!(wallet.transactions()[1].category, "Food");
    }

    #[test]
    fn test_header_skipped() {
        let mut wallet = Wallet::new();
        let lines = ["TYPE;CATEGORY;AMOUNT", "EXPENSE;Travel;100;Taxi"];

        let imported = service().import_lines(&mut wallet, lines).unwrap();

        assert_eq!(imported, 1);
        assert_eq!(wallet.len(), 1);
        assert_eq!(wallet.transactions()[0].note, "Taxi");
    }

    #[test]
    fn test_header_after_leading_blank_line_skipped() {
        let mut wallet = Wallet::new();
        let lines = ["", "type,category,amount,note", "INCOME,Salary,10"];

        assert_eq!(service().import_lines(&mut wallet, lines).unwrap(), 1);
    }

    #[test]
    fn test_header_only_detected_on_first_line() {
        let mut wallet = Wallet::new();
        let lines = ["INCOME,Salary,10", "type,category,amount"];

        let err = service().import_lines(&mut wallet, lines).unwrap_err();
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_unknown_type_reports_line() {
        let mut wallet = Wallet::new();

        let err = service()
            .import_lines(&mut wallet, ["UNKNOWN,Food,100"])
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.line(), Some(1));
        assert!(wallet.is_empty());
    }

    #[test]
    fn test_transfer_types_not_importable() {
        let mut wallet = Wallet::new();
        let err = service()
            .import_lines(&mut wallet, ["TRANSFER_IN,Gift,5"])
            .unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_lowercase_type_accepted() {
        let mut wallet = Wallet::new();
        service()
            .import_lines(&mut wallet, [" income , Salary , 10 "])
            .unwrap();
        assert_eq!(wallet.transactions()[0].kind, TransactionType::Income);
        assert_eq!(wallet.transactions()[0].category, "Salary");
    }

    #[test]
    fn test_too_few_columns() {
        let mut wallet = Wallet::new();
        let err = service()
            .import_lines(&mut wallet, ["INCOME,Salary"])
            .unwrap_err();
        assert_eq!(err.line(), Some(1));
    }

    #[test]
    fn test_invalid_amounts() {
        for bad in ["0", "-5", "abc", ""] {
            let mut wallet = Wallet::new();
            let line = format!("EXPENSE,Food,{}", bad);
            let err = service().import_lines(&mut wallet, [line]).unwrap_err();
            assert!(err.is_validation(), "amount {:?} should be rejected", bad);
            assert!(wallet.is_empty());
        }
    }

    #[test]
    fn test_digit_group_separators_rejected() {
        for bad in ["1_000", "\"1 000\"", "1'000"] {
            let mut wallet = Wallet::new();
            let line = format!("EXPENSE,Food,{}", bad);
            let err = service().import_lines(&mut wallet, [line]).unwrap_err();
            assert_eq!(err.line(), Some(1), "amount {:?} should be rejected", bad);
            assert!(wallet.is_empty());
        }
    }

    #[test]
    fn test_oversized_amount_reports_line() {
        let mut wallet = Wallet::new();
        let lines = [
            "INCOME,Salary,10",
            "INCOME,Big,40000000000000000000000000000",
            "INCOME,Big,40000000000000000000000000000",
        ];

        let err = service().import_lines(&mut wallet, lines).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("maximum"));
        assert_eq!(wallet.len(), 1);
        assert_eq!(wallet.balance().to_string(), "10.00");
    }

    #[test]
    fn test_decimal_comma_and_rounding() {
        let mut wallet = Wallet::new();
        service()
            .import_lines(&mut wallet, ["EXPENSE;Food;\"12,345\"", "EXPENSE;Food;0.005"])
            .unwrap();

        assert_eq!(wallet.transactions()[0].amount.to_string(), "12.35");
        assert_eq!(wallet.transactions()[1].amount.to_string(), "0.01");
    }

    #[test]
    fn test_blank_lines_consume_line_numbers() {
        let mut wallet = Wallet::new();
        let lines = ["INCOME,Salary,10", "", "   ", "EXPENSE,Food,oops"];

        let err = service().import_lines(&mut wallet, lines).unwrap_err();
        assert_eq!(err.line(), Some(4));
    }

    #[test]
    fn test_incremental_keeps_applied_lines() {
        let mut wallet = Wallet::new();
        let lines = ["INCOME,Salary,10", "EXPENSE,Food,5", "BOGUS,Food,1"];

        let err = service().import_lines(&mut wallet, lines).unwrap_err();

        assert_eq!(err.line(), Some(3));
        assert_eq!(wallet.len(), 2);
    }

    #[test]
    fn test_all_or_nothing_applies_nothing_on_error() {
        let mut wallet = Wallet::new();
        let lines = ["INCOME,Salary,10", "EXPENSE,Food,5", "BOGUS,Food,1"];
        let service = ImportService::new(ImportMode::AllOrNothing);

        let err = service.import_lines(&mut wallet, lines).unwrap_err();

        assert_eq!(err.line(), Some(3));
        assert!(wallet.is_empty());
    }

    #[test]
    fn test_all_or_nothing_applies_everything_on_success() {
        let mut wallet = Wallet::new();
        let service = ImportService::new(ImportMode::AllOrNothing);

        let imported = service
            .import_lines(&mut wallet, ["INCOME,Salary,10", "EXPENSE,Food,4"])
            .unwrap();

        assert_eq!(imported, 2);
        assert_eq!(wallet.balance().to_string(), "6.00");
    }

    #[test]
    fn test_note_quotes_stripped() {
        let mut wallet = Wallet::new();
        service()
            .import_lines(&mut wallet, [r#"EXPENSE,Food,5,"Dinner, late""#])
            .unwrap();
        assert_eq!(wallet.transactions()[0].note, "Dinner, late");
    }

    #[test]
    fn test_blank_category_becomes_uncategorized() {
        let mut wallet = Wallet::new();
        service().import_lines(&mut wallet, ["EXPENSE,,5"]).unwrap();
        assert_eq!(
            wallet.transactions()[0].category,
            crate::models::UNCATEGORIZED
        );
    }

    #[test]
    fn test_import_reader() {
        let mut wallet = Wallet::new();
        let data = "type,category,amount,note\nINCOME,Salary,1000,Monthly pay\nEXPENSE,Food,250,Lunch\n";

        let imported = service()
            .import_reader(&mut wallet, Cursor::new(data))
            .unwrap();

        assert_eq!(imported, 2);
        assert_eq!(wallet.balance().to_string(), "750.00");
    }

    #[test]
    fn test_import_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.csv");
        std::fs::write(&path, "TYPE;CATEGORY;AMOUNT\nEXPENSE;Travel;100;Taxi").unwrap();
        let mut wallet = Wallet::new();

        assert_eq!(service().import_file(&mut wallet, &path).unwrap(), 1);
    }

    #[test]
    fn test_import_missing_file_is_validation_error() {
        let temp_dir = TempDir::new().unwrap();
        let mut wallet = Wallet::new();

        let err = service()
            .import_file(&mut wallet, &temp_dir.path().join("nope.csv"))
            .unwrap_err();

        assert!(err.is_validation());
    }
}
