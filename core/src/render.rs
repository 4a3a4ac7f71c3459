//! Human-readable rendering of API results.
//!
//! `VegetablePage` renders as a page header, the total count and an aligned
//! table. The confirmations render their server message followed by what
//! they carry. Column widths count chars, so Vietnamese names line up.

use std::fmt;

use crate::types::{Created, Deleted, Updated, Vegetable, VegetablePage};

const HEADERS: [&str; 5] = ["ID", "Name", "Price", "Group", "Description"];

/// Whole prices print without a fractional part.
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 && price.is_finite() {
        format!("{price:.0}")
    } else {
        price.to_string()
    }
}

fn row(vegetable: &Vegetable) -> [String; 5] {
    [
        vegetable.id.to_string(),
        vegetable.name.clone(),
        format_price(vegetable.price),
        vegetable.group.clone().unwrap_or_default(),
        vegetable.description.clone().unwrap_or_default(),
    ]
}

fn write_row(f: &mut fmt::Formatter<'_>, cells: &[String; 5], widths: &[usize; 5]) -> fmt::Result {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    write!(f, "\n{}", line.trim_end())
}

impl fmt::Display for Vegetable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}, price {}", self.id, self.name, format_price(self.price))?;
        if let Some(group) = &self.group {
            write!(f, ", group {group}")?;
        }
        if let Some(description) = &self.description {
            write!(f, ": {description}")?;
        }
        Ok(())
    }
}

impl fmt::Display for VegetablePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {}/{}\nTotal: {}", self.page, self.pages, self.total)?;
        if self.data.is_empty() {
            return write!(f, "\n(no records)");
        }

        let header = HEADERS.map(String::from);
        let rows: Vec<[String; 5]> = self.data.iter().map(row).collect();
        let mut widths = [0usize; 5];
        for cells in std::iter::once(&header).chain(&rows) {
            for (width, cell) in widths.iter_mut().zip(cells) {
                *width = (*width).max(cell.chars().count());
            }
        }

        write_row(f, &header, &widths)?;
        for cells in &rows {
            write_row(f, cells, &widths)?;
        }
        Ok(())
    }
}

impl fmt::Display for Created {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nCreated: {}", self.message, self.data)
    }
}

impl fmt::Display for Updated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\nUpdated fields: {}", self.message, self.updated_fields.join(", "))
    }
}

impl fmt::Display for Deleted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
