//! Options that control how ring elements are printed.

use std::fmt::{self, Write};

/// Options that control how ring elements are printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct PrintOptions {
    pub multiplication_operator: char,
    pub num_exp_as_superscript: bool,
    /// The symbol used for the imaginary unit of complex extensions.
    pub complex_unit: char,
    /// Print a fraction with denominator one as `a/1`.
    pub explicit_denominator: bool,
}

impl PrintOptions {
    pub const fn new() -> PrintOptions {
        PrintOptions {
            multiplication_operator: '*',
            num_exp_as_superscript: false,
            complex_unit: 'i',
            explicit_denominator: false,
        }
    }

    /// Print in a form that is easy to read for humans.
    pub const fn pretty() -> PrintOptions {
        PrintOptions {
            multiplication_operator: ' ',
            num_exp_as_superscript: true,
            complex_unit: '𝑖',
            explicit_denominator: false,
        }
    }

    /// Print in a form that can be parsed by Mathematica.
    pub const fn mathematica() -> PrintOptions {
        PrintOptions {
            multiplication_operator: '*',
            num_exp_as_superscript: false,
            complex_unit: 'I',
            explicit_denominator: false,
        }
    }

    /// The `#` flag of the formatter selects the pretty output.
    pub fn update_with_fmt(mut self, f: &fmt::Formatter) -> Self {
        if f.alternate() {
            self.multiplication_operator = ' ';
            self.num_exp_as_superscript = true;
        }
        self
    }

    pub(crate) fn write_exponent<W: Write>(&self, e: usize, f: &mut W) -> fmt::Result {
        if e == 1 {
            return Ok(());
        }

        if self.num_exp_as_superscript {
            const SUPERSCRIPTS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
            for c in e.to_string().chars() {
                f.write_char(SUPERSCRIPTS[c as usize - '0' as usize])?;
            }
            Ok(())
        } else {
            write!(f, "^{}", e)
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// The context in which an element is printed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PrintState {
    /// The element is a factor of a product, so a sum must be wrapped in parentheses.
    pub in_product: bool,
    /// The element must print as a single atom, for example as a denominator.
    pub in_exp: bool,
}

impl PrintState {
    pub const fn new() -> PrintState {
        PrintState {
            in_product: false,
            in_exp: false,
        }
    }

    pub fn update_with_fmt(self, _f: &fmt::Formatter) -> Self {
        self
    }

    pub fn product(self) -> Self {
        PrintState {
            in_product: true,
            ..self
        }
    }

    pub fn exp(self) -> Self {
        PrintState {
            in_exp: true,
            ..self
        }
    }
}

/// Join the terms of a sum, letting a term that starts with a minus sign replace the `+`.
pub(crate) fn write_sum<W: Write>(terms: &[String], parenthesize: bool, f: &mut W) -> fmt::Result {
    if parenthesize {
        f.write_char('(')?;
    }

    for (i, t) in terms.iter().enumerate() {
        if i > 0 && !t.starts_with('-') {
            f.write_char('+')?;
        }
        f.write_str(t)?;
    }

    if parenthesize {
        f.write_char(')')?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{write_sum, PrintOptions};

    #[test]
    fn sums_and_exponents() {
        let mut s = String::new();
        write_sum(&["x^2".into(), "-1/4".into(), "3".into()], false, &mut s).unwrap();
        assert_eq!(s, "x^2-1/4+3");

        let mut s = String::new();
        write_sum(&["x".into(), "1".into()], true, &mut s).unwrap();
        assert_eq!(s, "(x+1)");

        let mut s = String::new();
        PrintOptions::pretty().write_exponent(12, &mut s).unwrap();
        assert_eq!(s, "¹²");
    }
}
