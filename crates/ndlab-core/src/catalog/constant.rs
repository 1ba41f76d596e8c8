//! Named constants usable inside expressions.
//!
//! A filter such as `L_DECAY.MODE = DECAY_Bm` is rewritten with the constant's
//! literal before it reaches the database.

/// Literal value of a named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstantValue {
    /// Integer code.
    Int(i64),
    /// Text code, quoted when substituted.
    Text(&'static str),
}

/// A named constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Constant {
    /// Name as written in expressions.
    pub name: &'static str,
    /// Literal value.
    pub value: ConstantValue,
}

impl Constant {
    /// SQL literal for this constant.
    pub fn literal(&self) -> String {
        match self.value {
            ConstantValue::Int(v) => v.to_string(),
            ConstantValue::Text(v) => format!("'{v}'"),
        }
    }
}

const fn int(name: &'static str, value: i64) -> Constant {
    Constant {
        name,
        value: ConstantValue::Int(value),
    }
}

const fn text(name: &'static str, value: &'static str) -> Constant {
    Constant {
        name,
        value: ConstantValue::Text(value),
    }
}

/// Every constant known to the nuclear-data catalog.
pub const CONSTANTS: &[Constant] = &[
    // decay codes
    int("DECAY_A", 0),
    int("DECAY_Bm", 2),
    int("DECAY_IT", 3),
    int("DECAY_P", 4),
    int("DECAY_N", 5),
    int("DECAY_BmN", 6),
    int("DECAY_EC", 7),
    int("DECAY_SF", 8),
    int("DECAY_D", 9),
    int("DECAY_ECP", 10),
    int("DECAY_3HE", 11),
    int("DECAY_BpP", 12),
    int("DECAY_3H", 13),
    int("DECAY_G", 14),
    int("DECAY_Bp", 15),
    int("DECAY_ECA", 16),
    int("DECAY_Bm2N", 17),
    int("DECAY_8BE", 18),
    int("DECAY_BpA", 19),
    int("DECAY_2Bm", 20),
    int("DECAY_2P", 21),
    int("DECAY_BmA", 22),
    int("DECAY_14C", 23),
    int("DECAY_EC2P", 24),
    int("DECAY_Bp2P", 25),
    int("DECAY_2Bp", 26),
    int("DECAY_ECSF", 28),
    int("DECAY_Bm3N", 29),
    int("DECAY_2EC", 30),
    int("DECAY_ECF", 32),
    int("DECAY_NE", 33),
    int("DECAY_ECP_EC2P", 34),
    int("DECAY_24NE", 38),
    int("DECAY_BF", 39),
    int("DECAY_SF_Bm", 41),
    int("DECAY_Bm4N", 42),
    int("DECAY_SF_EC_Bm", 44),
    int("DECAY_IT_EC_Bp", 45),
    int("DECAY_EC3P", 46),
    int("DECAY_Bp3P", 46),
    int("DECAY_20NE", 47),
    int("DECAY_BmF", 49),
    int("DECAY_BpEC", 50),
    int("DECAY_20O", 51),
    int("DECAY_MG", 52),
    int("DECAY_ECAP", 53),
    int("DECAY_2e", 54),
    int("DECAY_BmP", 55),
    int("DECAY_12C", 57),
    int("DECAY_25NE", 58),
    int("DECAY_34SI", 59),
    int("DECAY_22NE", 60),
    int("DECAY_2N", 61),
    int("DECAY_EC_SF", 62),
    int("DECAY_SF_EC_Bp", 63),
    int("DECAY_BmSF", 64),
    int("DECAY_Bm5N", 65),
    int("DECAY_BpF", 66),
    int("DECAY_28MG", 67),
    int("DECAY_Bm6N", 68),
    int("DECAY_Bm7N", 69),
    // delayed particles
    text("DELAY_N", "DN"),
    text("DELAY_A", "DA"),
    text("DELAY_P", "DP"),
    // ENSDF spin-parity assignment strength
    int("JP_STRONG", 0),
    int("JP_WEAK", 1),
    // RIPL spin assignment methods
    int("RIPL_J_UNKNOWN", -1),
    int("RIPL_J_UNIQUE", 0),
    int("RIPL_J_DISTRIBUTION_GAMMA", 1),
    int("RIPL_J_DISTRIBUTION", 2),
    int("RIPL_J_DISTRIBUTION_CONSTRAIN", 3),
    // RIPL parity
    int("RIPL_P_PLUS", 1),
    int("RIPL_P_MINUS", 0),
    // beta transition types
    text("TRANS_1NU", "1NU"),
    text("TRANS_1U", "1U"),
    text("TRANS_2NU", "2NU"),
    text("TRANS_2U", "2U"),
    text("TRANS_3NU", "3NU"),
    text("TRANS_3U", "3U"),
    text("TRANS_4NU", "4NU"),
    text("TRANS_4U", "4U"),
    text("TRANS_5NU", "5NU"),
    text("TRANS_5U", "5U"),
    text("TRANS_7NU", "7NU"),
    text("TRANS_8U", "8U"),
    text("TRANS_A", "A"),
    text("TRANS_S", "S"),
    // atomic shells, IUPAC notation
    text("SHELL_K", "K"),
    text("SHELL_KA1", "KA1"),
    text("SHELL_KA2", "KA2"),
    text("SHELL_KB", "KB"),
    text("SHELL_KLL", "KLL"),
    text("SHELL_KLX", "KLX"),
    text("SHELL_KXY", "KXY"),
    text("SHELL_KpB1", "KpB1"),
    text("SHELL_KpB2", "KpB2"),
    text("SHELL_L", "L"),
    text("SHELL_L1", "L1"),
    text("SHELL_L1M2", "L1M2"),
    text("SHELL_L1M3", "L1M3"),
    text("SHELL_L1N2", "L1N2"),
    text("SHELL_L1N3", "L1N3"),
    text("SHELL_L1O23", "L1O23"),
    text("SHELL_L2", "L2"),
    text("SHELL_L2M1", "L2M1"),
    text("SHELL_L2M4", "L2M4"),
    text("SHELL_L2N1", "L2N1"),
    text("SHELL_L2N4", "L2N4"),
    text("SHELL_L2O1", "L2O1"),
    text("SHELL_L2O4", "L2O4"),
    text("SHELL_L3", "L3"),
    text("SHELL_L3M1", "L3M1"),
    text("SHELL_L3M4", "L3M4"),
    text("SHELL_L3M5", "L3M5"),
    text("SHELL_L3N1", "L3N1"),
    text("SHELL_L3N45", "L3N45"),
    text("SHELL_L3O1", "L3O1"),
    text("SHELL_L3P1", "L3P1"),
    text("SHELL_M", "M"),
    text("SHELL_N", "N"),
    text("SHELL_NPLUS", "N+"),
    text("SHELL_O", "O"),
];

/// Look up a constant by name.
pub fn find_constant(name: &str) -> Option<&'static Constant> {
    CONSTANTS.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_literals() {
        assert_eq!(find_constant("DECAY_Bm").unwrap().literal(), "2");
        assert_eq!(find_constant("SHELL_NPLUS").unwrap().literal(), "'N+'");
        assert_eq!(find_constant("RIPL_J_UNKNOWN").unwrap().literal(), "-1");
        assert!(find_constant("DECAY_UNKNOWN").is_none());
    }

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for c in CONSTANTS {
            assert!(seen.insert(c.name), "duplicate constant {}", c.name);
        }
    }
}
