use super::{Category, MonthBudget};

/// Named set of per-category monthly allocations.
#[derive(Debug, Clone, Copy)]
pub struct BudgetTemplate {
    pub name: &'static str,
    pub allocations: &'static [(&'static str, f64)],
}

impl BudgetTemplate {
    pub fn month_budget(&self) -> MonthBudget {
        self.allocations
            .iter()
            .map(|(category, amount)| (Category::from(*category), *amount))
            .collect()
    }

    pub fn total(&self) -> f64 {
        self.allocations.iter().map(|(_, amount)| amount).sum()
    }
}

/// Case-insensitive template lookup.
pub fn template(name: &str) -> Option<&'static BudgetTemplate> {
    let needle = name.trim();
    TEMPLATES
        .iter()
        .find(|template| template.name.eq_ignore_ascii_case(needle))
}

pub static TEMPLATES: [BudgetTemplate; 3] = [
    BudgetTemplate {
        name: "Conservative",
        allocations: &[
            ("Credit Card EMI 1", 15000.0),
            ("Credit Card EMI 2", 12000.0),
            ("Personal Loan EMI 1", 8000.0),
            ("Personal Loan EMI 2", 6000.0),
            ("Home Loan EMI", 25000.0),
            ("Mutual Fund SIP", 5000.0),
            ("PPF", 2000.0),
            ("RD", 3000.0),
            ("Ponmagan Policy", 1500.0),
            ("Gold Investment", 2000.0),
            ("Bitcoin Investment", 1000.0),
            ("Baby Health Policy", 800.0),
            ("Baby Education Policy", 1200.0),
            ("OTT Subscriptions", 500.0),
            ("Hospital", 8000.0),
            ("Swiggy/Food", 3000.0),
            ("Petrol", 3000.0),
            ("General Expenses", 5000.0),
            ("Shopping", 5000.0),
        ],
    },
    BudgetTemplate {
        name: "Moderate",
        allocations: &[
            ("Credit Card EMI 1", 15000.0),
            ("Credit Card EMI 2", 12000.0),
            ("Personal Loan EMI 1", 8000.0),
            ("Personal Loan EMI 2", 6000.0),
            ("Home Loan EMI", 25000.0),
            ("Mutual Fund SIP", 7000.0),
            ("PPF", 2000.0),
            ("RD", 3000.0),
            ("Ponmagan Policy", 1500.0),
            ("Gold Investment", 3000.0),
            ("Bitcoin Investment", 2000.0),
            ("Baby Health Policy", 800.0),
            ("Baby Education Policy", 1200.0),
            ("OTT Subscriptions", 800.0),
            ("Hospital", 10000.0),
            ("Swiggy/Food", 5000.0),
            ("Petrol", 4000.0),
            ("General Expenses", 8000.0),
            ("Shopping", 8000.0),
        ],
    },
    BudgetTemplate {
        name: "Aggressive",
        allocations: &[
            ("Credit Card EMI 1", 15000.0),
            ("Credit Card EMI 2", 12000.0),
            ("Personal Loan EMI 1", 8000.0),
            ("Personal Loan EMI 2", 6000.0),
            ("Home Loan EMI", 25000.0),
            ("Mutual Fund SIP", 10000.0),
            ("PPF", 2000.0),
            ("RD", 5000.0),
            ("Ponmagan Policy", 1500.0),
            ("Gold Investment", 5000.0),
            ("Bitcoin Investment", 3000.0),
            ("Baby Health Policy", 1000.0),
            ("Baby Education Policy", 1500.0),
            ("OTT Subscriptions", 1000.0),
            ("Hospital", 12000.0),
            ("Swiggy/Food", 8000.0),
            ("Petrol", 5000.0),
            ("General Expenses", 10000.0),
            ("Shopping", 12000.0),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(template("moderate").map(|t| t.name), Some("Moderate"));
        assert!(template("Lavish").is_none());
    }

    #[test]
    fn conservative_template_covers_every_category() {
        let budget = template("Conservative").unwrap().month_budget();
        assert_eq!(budget.len(), 19);
        assert_eq!(budget.get(&Category::from("Home Loan EMI")), Some(&25000.0));
    }
}
