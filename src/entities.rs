//! Entity enumerators: the endpoint catalog and random source IPs.

use rand::Rng;

/// Fixed endpoint catalog, in emission order.
pub const ENDPOINTS: [&str; 5] = [
    "/example/endpoint1",
    "/example/endpoint2",
    "/example/endpoint3",
    "/example/endpoint4",
    "/example/endpoint5",
];

/// The endpoint catalog as owned strings
pub fn endpoints() -> Vec<String> {
    ENDPOINTS.iter().map(|e| e.to_string()).collect()
}

/// A random dotted-quad address with each octet uniform in [0, 255]
pub fn random_ip<R: Rng + ?Sized>(rng: &mut R) -> String {
    let octets: [u8; 4] = [rng.gen(), rng.gen(), rng.gen(), rng.gen()];
    format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}

/// `count` independent random addresses. Duplicates are allowed.
pub fn random_ips<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<String> {
    (0..count).map(|_| random_ip(rng)).collect()
}
