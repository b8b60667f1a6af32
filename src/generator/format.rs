//! Display formatting for numeric answers. Option strings are compared
//! verbatim when answers are checked, so these outputs must stay stable.

/// `1234567` -> `"1,234,567"`.
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Grouped integer part followed by at most three fraction digits,
/// trailing zeros dropped.
fn group_decimal(value: f64) -> String {
    let value = value.max(0.0);
    let rounded = (value * 1000.0).round() / 1000.0;
    let whole = rounded.trunc();
    let fraction = ((rounded - whole) * 1000.0).round() as u64;

    let mut out = group_thousands(whole as u64);
    if fraction > 0 {
        let digits = format!("{:03}", fraction);
        out.push('.');
        out.push_str(digits.trim_end_matches('0'));
    }
    out
}

pub fn format_population(population: f64) -> String {
    if population >= 1e9 {
        format!("{:.2} billion", population / 1e9)
    } else if population >= 1e6 {
        format!("{:.1} million", population / 1e6)
    } else {
        group_thousands(population.max(0.0).round() as u64)
    }
}

pub fn format_area(area: f64) -> String {
    format!("{} km²", group_decimal(area))
}

pub fn format_gdp(gdp: f64) -> String {
    if gdp >= 1e12 {
        format!("${:.2} trillion", gdp / 1e12)
    } else if gdp >= 1e9 {
        format!("${:.1} billion", gdp / 1e9)
    } else if gdp >= 1e6 {
        format!("${:.0} million", gdp / 1e6)
    } else {
        format!("${}", group_thousands(gdp.max(0.0).round() as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_digits() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(17_075_400), "17,075,400");
    }

    #[test]
    fn population_bands() {
        assert_eq!(format_population(1_500_000_000.0), "1.50 billion");
        assert_eq!(format_population(25_000_000.0), "25.0 million");
        assert_eq!(format_population(800.0), "800");
        assert_eq!(format_population(512_345.0), "512,345");
    }

    #[test]
    fn area_with_suffix() {
        assert_eq!(format_area(17_075_400.0), "17,075,400 km²");
        assert_eq!(format_area(0.44), "0.44 km²");
        assert_eq!(format_area(0.0), "0 km²");
    }

    #[test]
    fn gdp_bands() {
        assert_eq!(format_gdp(2_000_000_000_000.0), "$2.00 trillion");
        assert_eq!(format_gdp(4_500_000_000.0), "$4.5 billion");
        assert_eq!(format_gdp(12_000_000.0), "$12 million");
        assert_eq!(format_gdp(750_000.0), "$750,000");
    }
}
