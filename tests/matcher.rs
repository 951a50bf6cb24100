mod common {
    use std::io::Write;

    pub fn init() {
        let _ = env_logger::builder()
            .format(|buf, record| writeln!(buf, "{}", record.args()))
            .is_test(true)
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use ipmatch_trie::{addr, errors::ParseError, Ipv4Prefix, Matcher};

    struct RangeCase {
        range: &'static str,
        label: &'static str,
        inside: &'static [&'static str],
        outside: &'static [&'static str],
    }

    const CASES: &[RangeCase] = &[
        RangeCase {
            range: "1.2.5.0/24",
            label: "BJ",
            inside: &["1.2.5.0", "1.2.5.255"],
            outside: &["1.2.4.255", "1.2.6.0"],
        },
        RangeCase {
            range: "1.2.5.1/32",
            label: "OF",
            inside: &["1.2.5.1"],
            outside: &["1.2.5.2"],
        },
        RangeCase {
            range: "210.32.122.192/27",
            label: "HZ",
            inside: &["210.32.122.192", "210.32.122.222", "210.32.122.223"],
            outside: &["210.32.122.191", "210.32.122.224"],
        },
    ];

    fn all_cases() -> Result<Matcher<&'static str>, ParseError> {
        let matcher = Matcher::new();
        for case in CASES {
            matcher.add(case.range, case.label)?;
        }
        Ok(matcher)
    }

    #[test]
    fn test_each_range_on_its_own() -> Result<(), Box<dyn std::error::Error>> {
        crate::common::init();

        for case in CASES {
            let matcher = Matcher::new();
            matcher.add(case.range, case.label)?;

            for ip in case.inside {
                assert_eq!(
                    matcher.match_ip(ip)?,
                    Some(case.label),
                    "{} should be in {}",
                    ip,
                    case.range
                );
            }
            for ip in case.outside {
                assert_eq!(
                    matcher.match_ip(ip)?,
                    None,
                    "{} should not be in {}",
                    ip,
                    case.range
                );
            }
        }
        Ok(())
    }

    #[test]
    fn test_all_ranges_together() -> Result<(), Box<dyn std::error::Error>> {
        crate::common::init();
        let matcher = all_cases()?;

        for case in CASES {
            for ip in case.inside {
                assert_eq!(matcher.match_ip(ip)?, Some(case.label), "{}", ip);
            }
            for ip in case.outside {
                assert_ne!(matcher.match_ip(ip)?, Some(case.label), "{}", ip);
            }
        }

        // 1.2.5.1/32 is more specific than 1.2.5.0/24
        assert_eq!(matcher.match_ip("1.2.5.1")?, Some("OF"));
        assert_eq!(matcher.match_ip("1.2.5.2")?, Some("BJ"));
        assert_eq!(matcher.match_ip("1.2.5.0")?, Some("BJ"));
        assert_eq!(matcher.prefixes_len(), 3);

        Ok(())
    }

    #[test]
    fn test_insertion_order_does_not_matter(
    ) -> Result<(), Box<dyn std::error::Error>> {
        crate::common::init();

        let matcher = Matcher::new();
        matcher.add("1.2.5.1/32", "OF")?;
        matcher.add("1.2.5.0/24", "BJ")?;
        matcher.add("1.0.0.0/8", "ONE")?;

        assert_eq!(matcher.match_ip("1.2.5.1")?, Some("OF"));
        assert_eq!(matcher.match_ip("1.2.5.2")?, Some("BJ"));
        assert_eq!(matcher.match_ip("1.200.0.0")?, Some("ONE"));
        assert_eq!(matcher.match_ip("2.0.0.0")?, None);

        Ok(())
    }

    #[test]
    fn test_match_prefix() -> Result<(), Box<dyn std::error::Error>> {
        crate::common::init();
        let matcher = all_cases()?;

        let (pfx, label) =
            matcher.match_prefix("210.32.122.200")?.ok_or("no match")?;
        assert_eq!(pfx, "210.32.122.192/27".parse::<Ipv4Prefix>()?);
        assert_eq!(label, "HZ");

        let (pfx, label) =
            matcher.match_prefix("1.2.5.1")?.ok_or("no match")?;
        assert_eq!(pfx.to_string(), "1.2.5.1/32");
        assert_eq!(label, "OF");

        assert_eq!(matcher.match_prefix("9.9.9.9")?, None);
        Ok(())
    }

    #[test]
    fn test_match_ipv4() -> Result<(), Box<dyn std::error::Error>> {
        let matcher = all_cases()?;

        assert_eq!(
            matcher.match_ipv4(std::net::Ipv4Addr::new(210, 32, 122, 223)),
            Some("HZ")
        );
        assert_eq!(
            matcher.match_ipv4(std::net::Ipv4Addr::new(210, 32, 122, 224)),
            None
        );
        Ok(())
    }

    #[test]
    fn test_reinsert_replaces_value() -> Result<(), Box<dyn std::error::Error>>
    {
        crate::common::init();

        let matcher = Matcher::new();
        matcher.add("1.2.5.0/24", "first")?;
        matcher.add("1.2.5.0/24", "second")?;
        // same range, different host bits
        matcher.add("1.2.5.128/24", "third")?;

        assert_eq!(matcher.match_ip("1.2.5.0")?, Some("third"));
        assert_eq!(matcher.match_ip("1.2.5.255")?, Some("third"));
        assert_eq!(matcher.prefixes_len(), 1);

        Ok(())
    }

    #[test]
    fn test_empty_values_are_found() -> Result<(), Box<dyn std::error::Error>>
    {
        let matcher = Matcher::new();
        matcher.add("10.0.0.0/8", String::new())?;
        matcher.add("11.0.0.0/8", "eleven".to_string())?;

        assert_eq!(matcher.match_ip("10.1.1.1")?, Some(String::new()));
        assert_eq!(matcher.match_ip("12.1.1.1")?, None);

        let options = Matcher::new();
        options.add("10.0.0.0/8", None::<u32>)?;
        assert_eq!(options.match_ip("10.1.1.1")?, Some(None));
        assert_eq!(options.match_ip("12.1.1.1")?, None);

        Ok(())
    }

    #[test]
    fn test_no_false_match() -> Result<(), Box<dyn std::error::Error>> {
        let matcher = all_cases()?;

        for ip in ["0.0.0.0", "255.255.255.255", "1.2.0.0", "210.32.0.0"] {
            assert_eq!(matcher.match_ip(ip)?, None, "{}", ip);
        }
        Ok(())
    }

    #[test]
    fn test_validation_rejects() {
        assert_eq!(addr::parse_address("1.2.3"), Err(ParseError::InvalidAddress));
        assert_eq!(
            addr::parse_address("1.2.3.4.5"),
            Err(ParseError::InvalidAddress)
        );
        assert_eq!(
            addr::parse_address("1.2.3.256"),
            Err(ParseError::InvalidAddress)
        );
        assert_eq!(addr::parse_address("1..2.3"), Err(ParseError::InvalidAddress));
        assert_eq!(addr::parse_mask_length("0"), Err(ParseError::InvalidMask));
        assert_eq!(addr::parse_mask_length("33"), Err(ParseError::InvalidMask));
        assert_eq!(addr::parse_cidr("1.2.3.4"), Err(ParseError::InvalidCidr));

        let matcher = Matcher::<u8>::new();
        assert_eq!(matcher.add("1.2.3.4", 0), Err(ParseError::InvalidCidr));
        assert_eq!(matcher.add("1.2.3.4/0", 0), Err(ParseError::InvalidMask));
        assert_eq!(matcher.add("1..2.3/8", 0), Err(ParseError::InvalidAddress));
        assert_eq!(matcher.match_ip("1.2.3"), Err(ParseError::InvalidAddress));
        assert!(matcher.is_empty());
    }

    #[test]
    fn test_stats() -> Result<(), Box<dyn std::error::Error>> {
        let matcher = all_cases()?;
        let stats = matcher.stats();

        assert_eq!(stats.prefixes_count(), 3);
        // root, 24 nodes towards 1.2.5.0/24, 8 more towards 1.2.5.1/32,
        // and 27 towards 210.32.122.192/27, which shares no bits with the
        // others.
        assert_eq!(stats.nodes_count(), 1 + 24 + 8 + 27);
        println!("{}", stats);

        Ok(())
    }
}
