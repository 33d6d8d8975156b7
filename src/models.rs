use std::fmt;

/// Canonical column roles every source table is mapped onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Product,
    Price,
    Weight,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Product, Role::Price, Role::Weight];
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Role::Product => "product",
            Role::Price => "price",
            Role::Weight => "weight",
        };
        f.write_str(name)
    }
}

/// One normalized product entry. Built only through [`CanonicalRecord::new`]
/// so `unit_price` always agrees with `price` and `weight`.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    pub name: String,
    pub price: f64,
    pub weight: f64,
    pub source_file: String,
    pub unit_price: f64,
}

impl CanonicalRecord {
    /// Caller guarantees `weight != 0.0`.
    pub fn new(name: String, price: f64, weight: f64, source_file: String) -> Self {
        Self {
            name,
            price,
            weight,
            source_file,
            unit_price: round2(price / weight),
        }
    }
}

/// Round to two fractional digits, ties away from zero. Values too large to
/// scale by 100 are already integral and come back unchanged.
pub fn round2(val: f64) -> f64 {
    let scaled = val * 100.0;
    if !scaled.is_finite() {
        return val;
    }
    scaled.round() / 100.0
}

/// Per-file column-role assignment; `None` means unresolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMapping {
    pub product: Option<String>,
    pub price: Option<String>,
    pub weight: Option<String>,
}

impl HeaderMapping {
    pub fn slot(&self, role: Role) -> Option<&str> {
        match role {
            Role::Product => self.product.as_deref(),
            Role::Price => self.price.as_deref(),
            Role::Weight => self.weight.as_deref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, role: Role) -> &mut Option<String> {
        match role {
            Role::Product => &mut self.product,
            Role::Price => &mut self.price,
            Role::Weight => &mut self.weight,
        }
    }

    pub fn missing_roles(&self) -> Vec<Role> {
        Role::ALL
            .into_iter()
            .filter(|r| self.slot(*r).is_none())
            .collect()
    }

    /// Promote to a fully resolved mapping, or report which roles are missing.
    pub fn resolved(self) -> std::result::Result<ResolvedMapping, Vec<Role>> {
        match (self.product, self.price, self.weight) {
            (Some(product), Some(price), Some(weight)) => Ok(ResolvedMapping {
                product,
                price,
                weight,
            }),
            (product, price, weight) => Err(HeaderMapping {
                product,
                price,
                weight,
            }
            .missing_roles()),
        }
    }
}

/// A mapping with every role bound to a header of the source table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMapping {
    pub product: String,
    pub price: String,
    pub weight: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price_is_derived() {
        let r = CanonicalRecord::new("Яблоко".into(), 100.0, 2.0, "price_a.csv".into());
        assert_eq!(r.unit_price, 50.0);
        let r = CanonicalRecord::new("Сыр".into(), 10.0, 3.0, "price_a.csv".into());
        assert_eq!(r.unit_price, 3.33);
    }

    #[test]
    fn test_round2_ties_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(2.5), 2.5);
        assert_eq!(round2(1.0 / 3.0), 0.33);
    }

    #[test]
    fn test_round2_does_not_overflow() {
        assert_eq!(round2(1e307), 1e307);
        assert_eq!(round2(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_resolved_reports_missing_roles() {
        let mapping = HeaderMapping {
            product: Some("товар".into()),
            price: None,
            weight: None,
        };
        assert_eq!(mapping.resolved(), Err(vec![Role::Price, Role::Weight]));
    }

    #[test]
    fn test_resolved_complete_mapping() {
        let mapping = HeaderMapping {
            product: Some("Товар".into()),
            price: Some("Цена".into()),
            weight: Some("Вес".into()),
        };
        let resolved = mapping.resolved().unwrap();
        assert_eq!(resolved.price, "Цена");
    }
}
