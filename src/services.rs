//! Static registry mapping well-known TCP ports to service names.

/// Sorted by port number so `service_name` can binary-search.
const WELL_KNOWN: &[(u16, &str)] = &[
    (20, "FTP-DATA"),
    (21, "FTP"),
    (22, "SSH"),
    (23, "Telnet"),
    (25, "SMTP"),
    (53, "DNS"),
    (67, "DHCP"),
    (68, "DHCP"),
    (69, "TFTP"),
    (80, "HTTP"),
    (110, "POP3"),
    (111, "RPCbind"),
    (123, "NTP"),
    (135, "MS-RPC"),
    (137, "NetBIOS-NS"),
    (138, "NetBIOS-DGM"),
    (139, "NetBIOS-SSN"),
    (143, "IMAP"),
    (161, "SNMP"),
    (389, "LDAP"),
    (443, "HTTPS"),
    (445, "SMB"),
    (465, "SMTPS"),
    (514, "Syslog"),
    (587, "SMTP-Submission"),
    (631, "IPP"),
    (993, "IMAPS"),
    (995, "POP3S"),
    (1080, "SOCKS"),
    (1433, "MSSQL"),
    (1521, "Oracle"),
    (1723, "PPTP"),
    (2049, "NFS"),
    (3306, "MySQL"),
    (3389, "RDP"),
    (5432, "PostgreSQL"),
    (5900, "VNC"),
    (5985, "WinRM"),
    (6379, "Redis"),
    (8000, "HTTP-Alt"),
    (8080, "HTTP-Proxy"),
    (8443, "HTTPS-Alt"),
    (9200, "Elasticsearch"),
    (11211, "Memcached"),
    (27017, "MongoDB"),
];

/// Look up the conventional service name for a port. Returns `"Unknown"`
/// for anything not in the table.
pub fn service_name(port: u16) -> &'static str {
    match WELL_KNOWN.binary_search_by_key(&port, |&(p, _)| p) {
        Ok(idx) => WELL_KNOWN[idx].1,
        Err(_) => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_and_unique() {
        for pair in WELL_KNOWN.windows(2) {
            assert!(pair[0].0 < pair[1].0, "table must stay sorted for binary search");
        }
    }

    #[test]
    fn known_ports_resolve() {
        assert_eq!(service_name(22), "SSH");
        assert_eq!(service_name(80), "HTTP");
        assert_eq!(service_name(443), "HTTPS");
        assert_eq!(service_name(3306), "MySQL");
        assert_eq!(service_name(3389), "RDP");
    }

    #[test]
    fn absent_ports_are_unknown() {
        assert_eq!(service_name(1), "Unknown");
        assert_eq!(service_name(49152), "Unknown");
        assert_eq!(service_name(65535), "Unknown");
    }
}
