//! Zufällige Events und Alerts für Tests und Lastsimulation.
//!
//! Alle Generatoren nehmen einen `Rng` entgegen; mit einem fest geseedeten
//! `StdRng` sind die Fixtures reproduzierbar (bis auf die Zeitstempel, die
//! relativ zu "jetzt" gewählt werden).

use evalert_core::{AlertState, EvAlert, EvEvent, EvLink, EvResource, EvTime, EvType};
use rand::seq::SliceRandom;
use rand::Rng;
use time::{Duration, OffsetDateTime};

const INTERFACES: &[&str] = &[
    "eth0", "eth1", "eth2", "wlan0", "wlan1", "wlan2", "lo", "eno1", "eno2", "eno3",
];

const COMPONENTS: &[&str] = &[
    "Relational databases (RDBMS)",
    "NoSQL databases",
    "Data warehouses",
    "HTTP servers",
    "Application servers",
    "Messaging queues",
    "API gateways",
    "Load balancers",
    "Authentication servers",
    "Caching engines",
    "Search engines",
    "MySQL",
    "PostgreSQL",
    "MongoDB",
    "Cassandra",
    "Redis",
    "Nginx",
    "Apache Tomcat",
    "Apache Kafka",
    "RabbitMQ",
    "HAProxy",
    "LDAP",
    "Kerberos",
    "Elasticsearch",
    "Logstash",
    "Nagios",
];

const CLASSIFICATIONS: &[&str] = &[
    "System status",
    "Threshold breach",
    "Utilization",
    "Performance metrics",
    "Uptime",
    "Downtime",
    "Latency",
    "Throughput",
    "Response time",
    "Error rate",
];

const ADJECTIVES: &[&str] = &[
    "auxiliary", "primary", "back-end", "digital", "open-source", "virtual", "cross-platform",
    "redundant", "online", "haptic", "multi-byte", "bluetooth", "wireless", "1080p", "neural",
    "optical", "solid state", "mobile",
];

const NOUNS: &[&str] = &[
    "driver", "protocol", "bandwidth", "panel", "microchip", "program", "port", "card", "array",
    "interface", "system", "sensor", "firewall", "hard drive", "pixel", "alarm", "feed", "monitor",
    "application", "transmitter", "bus", "circuit", "capacitor", "matrix",
];

const WORDS: &[&str] = &[
    "alpha", "amber", "basalt", "cedar", "delta", "ember", "falcon", "granite", "harbor", "iris",
    "juniper", "kestrel", "lumen", "meadow", "nimbus", "onyx", "pioneer", "quartz", "ridge",
    "summit", "tundra", "umber", "vertex", "willow",
];

const CITIES: &[&str] = &[
    "Frankfurt", "Berlin", "Amsterdam", "Dublin", "Paris", "Madrid", "Milan", "Stockholm",
    "Toronto", "Dallas", "Tokyo", "Sydney", "Singapore", "Seoul",
];

const TLDS: &[&str] = &["com", "net", "org", "io", "example"];

const PEOPLE: &[&str] = &[
    "Ada Lovelace", "Grace Hopper", "Alan Turing", "Edsger Dijkstra", "Barbara Liskov",
    "Donald Knuth", "Margaret Hamilton", "Ken Thompson", "Radia Perlman", "Leslie Lamport",
];

const TEAMS: &[&str] = &["crew", "squad", "staff", "team", "troupe", "band", "party"];

const LANG_IDS: &[&str] = &["eng", "fra", "deu", "jpn", "kor", "zho"];

const LINK_TYPES: &[&str] = &["webpage", "runbook", "dashboard", "ticket", "wiki"];

const SUMMARIES: &[&str] = &[
    "If we back up the monitor, we can get to the PCI bus through the redundant protocol!",
    "Try to parse the SQL sensor, maybe it will navigate the online panel!",
    "The AI matrix is down, quantify the neural firewall so we can index the XML array!",
    "You can't transmit the circuit without calculating the digital SMTP feed!",
    "Use the wireless SAS program, then you can compress the optical alarm!",
    "We need to bypass the back-end TCP driver!",
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn uuid<R: Rng + ?Sized>(rng: &mut R) -> String {
    uuid::Builder::from_random_bytes(rng.gen()).into_uuid().to_string()
}

fn app_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut name = pick(rng, WORDS).to_string();
    if let Some(first) = name.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!("{name}{}", pick(rng, NOUNS).replace(' ', ""))
}

fn domain_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{}{}.{}", pick(rng, WORDS), pick(rng, WORDS), pick(rng, TLDS))
}

fn ipv4<R: Rng + ?Sized>(rng: &mut R) -> String {
    let octets: [u8; 4] = rng.gen();
    format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3])
}

fn sentence<R: Rng + ?Sized>(rng: &mut R, words: usize) -> String {
    let body: Vec<&str> = (0..words).map(|_| pick(rng, WORDS)).collect();
    let mut text = body.join(" ");
    if let Some(first) = text.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    text.push('.');
    text
}

/// Zeitpunkt gleichverteilt in `[from, to]`; bei vertauschten Grenzen `from`.
fn time_between<R: Rng + ?Sized>(rng: &mut R, from: OffsetDateTime, to: OffsetDateTime) -> EvTime {
    let span = (to - from).whole_milliseconds();
    if span <= 0 {
        return EvTime::from(from);
    }
    #[allow(clippy::cast_possible_truncation)]
    let offset = rng.gen_range(0..=span as i64);
    EvTime::from(from + Duration::milliseconds(offset))
}

/// Ressource mit allen 15 bekannten Feldern belegt und ohne Extras.
pub fn random_resource<R: Rng + ?Sized>(rng: &mut R) -> EvResource {
    EvResource {
        name: app_name(rng),
        source_id: uuid(rng),
        hostname: domain_name(rng),
        ip_address: ipv4(rng),
        service: pick(rng, PEOPLE).to_string(),
        port: rng.gen_range(20..=65535),
        interface: pick(rng, INTERFACES).to_string(),
        application: app_name(rng),
        controller: pick(rng, NOUNS).to_string(),
        component: pick(rng, COMPONENTS).to_string(),
        cluster: pick(rng, WORDS).to_string(),
        location: pick(rng, CITIES).to_string(),
        access_scope: pick(rng, WORDS).to_string(),
        connection_id: uuid(rng),
        scope_id: uuid(rng),
        ..EvResource::default()
    }
}

/// Ein bis zwei Links.
pub fn random_links<R: Rng + ?Sized>(rng: &mut R) -> Vec<EvLink> {
    let count = rng.gen_range(1..=2);
    (0..count)
        .map(|_| EvLink {
            link_type: pick(rng, LINK_TYPES).to_string(),
            name: pick(rng, NOUNS).to_string(),
            description: sentence(rng, 20),
            url: format!("https://{}/{}", domain_name(rng), pick(rng, WORDS)),
        })
        .collect()
}

pub fn random_type<R: Rng + ?Sized>(rng: &mut R) -> EvType {
    let event_type = if rng.gen_bool(0.5) {
        EvType::PROBLEM
    } else {
        EvType::RESOLUTION
    };
    EvType::new(
        pick(rng, CLASSIFICATIONS),
        event_type,
        format!("{} {}", pick(rng, ADJECTIVES), pick(rng, NOUNS)),
    )
}

/// Event mit Vorkommen innerhalb des letzten Tages.
pub fn random_event<R: Rng + ?Sized>(rng: &mut R) -> EvEvent {
    let now = OffsetDateTime::now_utc();
    EvEvent {
        id: uuid(rng),
        occurrence_time: time_between(rng, now - Duration::days(1), now),
        summary: pick(rng, SUMMARIES).to_string(),
        severity: rng.gen_range(1..=6),
        sender: random_resource(rng),
        resource: random_resource(rng),
        expiry_seconds: rng.gen_range(300..=1000),
        links: random_links(rng),
        kind: random_type(rng),
        ..EvEvent::default()
    }
}

/// Offener Alert; erstes Vorkommen innerhalb der letzten Woche, letztes
/// zwischen erstem Vorkommen und jetzt.
pub fn random_alert<R: Rng + ?Sized>(rng: &mut R) -> EvAlert {
    let now = OffsetDateTime::now_utc();
    let kind = random_type(rng);
    let mut alert = EvAlert::new(uuid(rng), EvResource::default(), kind);

    alert.state = AlertState::Open;
    alert.event_count = rng.gen_range(1..=10);
    alert.acknowledged = rng.gen_bool(0.5);
    alert.team = format!("{} of {}", pick(rng, TEAMS), pick(rng, WORDS));
    alert.owner = pick(rng, PEOPLE).to_string();
    alert.summary = pick(rng, SUMMARIES).to_string();
    alert.lang_id = pick(rng, LANG_IDS).to_string();
    alert.severity = rng.gen_range(1..=6);
    alert.sender = random_resource(rng);
    alert.expiry_seconds = rng.gen_range(0..=3000);
    alert.links = random_links(rng);

    let first = time_between(rng, now - Duration::days(7), now);
    alert.first_occurrence_time = first;
    alert.occurrence_time = first;
    alert.last_occurrence_time = time_between(rng, first.as_offset_date_time(), now);

    alert.set_resource(random_resource(rng));
    alert
}
