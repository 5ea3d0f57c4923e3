//! Value tests shared by the rule tables.

use crate::LookupResult;

pub(crate) fn is_empty(values: &LookupResult) -> bool {
    values.is_empty()
}

pub(crate) fn is_set(values: &LookupResult) -> bool {
    values.found()
}

pub(crate) fn is_not_true(values: &LookupResult) -> bool {
    !values.truthy()
}

/// `[[ip:][hostPort]:]containerPort[/protocol]`, ports may be ranges.
pub(crate) fn valid_publish_ports(values: &LookupResult) -> bool {
    values.values().iter().all(|v| {
        regex!(
            r"^(?:(?:(?:\d{1,3}(?:\.\d{1,3}){3}|\[[0-9A-Fa-f:.]+\]):)?(?:\d+(?:-\d+)?)?:)?\d+(?:-\d+)?(?:/(?:tcp|udp|sctp))?$"
        )
        .is_match(&v.value)
    })
}

/// `port[-port][/protocol]`.
pub(crate) fn valid_expose_ports(values: &LookupResult) -> bool {
    values.values().iter().all(|v| regex!(r"^\d+(?:-\d+)?(?:/(?:tcp|udp|sctp))?$").is_match(&v.value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, LookupMode, UnitFile, lookup};

    fn ports(values: &[&str]) -> LookupResult {
        let mut b = UnitFile::builder("x.container");
        for v in values {
            b.add("Container", "PublishPort", v);
        }
        lookup(&b.build(), &Field::new("Container", "PublishPort", LookupMode::All, true))
    }

    #[test]
    fn publish_port_shapes() {
        for ok in ["80", "8080:80", "127.0.0.1:8080:80", "127.0.0.1::80", "[::1]:8080:80", "8000-8010:80-90/udp", "53/tcp"] {
            assert!(valid_publish_ports(&ports(&[ok])), "{ok}");
        }
        for bad in ["http", "80:", "1.2.3.4:80:80:80", "80/icmp"] {
            assert!(!valid_publish_ports(&ports(&["80", bad])), "{bad}");
        }
        assert!(valid_publish_ports(&ports(&[])));
    }

    #[test]
    fn expose_port_shapes() {
        assert!(valid_expose_ports(&ports(&["80", "90-95/sctp"])));
        assert!(!valid_expose_ports(&ports(&["8080:80"])));
    }
}
