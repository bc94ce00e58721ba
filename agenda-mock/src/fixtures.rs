//! Demo data
//!
//! Five professionals across the city zones, one client and one professional
//! account (password `123456` for both), a few appointments around today and
//! some notifications.

use chrono::{DateTime, Duration, NaiveTime, Utc, Weekday};
use rust_decimal::Decimal;
use shared::models::{
    Address, Appointment, AppointmentStatus, Contact, HairPrices, Location, Notification,
    NotificationKind, NotificationStatus, Professional, Review, Service, User, UserType,
    WorkingHours,
};

use crate::state::{Account, MockData};

pub const CLIENT_EMAIL: &str = "cliente@teste.com";
pub const PROFESSIONAL_EMAIL: &str = "profissional@teste.com";
pub const PASSWORD: &str = "123456";

pub const CLIENT_ID: &str = "user-client";
pub const PROFESSIONAL_USER_ID: &str = "user-pro";

pub fn seed() -> MockData {
    let now = Utc::now();
    MockData {
        accounts: accounts(now),
        professionals: professionals(now)
            .into_iter()
            .map(|mut p| {
                p.sync_categories();
                p
            })
            .collect(),
        appointments: appointments(now),
        notifications: notifications(now),
        blocks: Vec::new(),
    }
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// `days` from today at `hour:00` UTC
fn day_at(now: DateTime<Utc>, days: i64, hour: u32) -> DateTime<Utc> {
    (now.date_naive() + Duration::days(days))
        .and_time(at(hour, 0))
        .and_utc()
}

fn week(opens: NaiveTime, closes: NaiveTime, closed: &[Weekday]) -> Vec<WorkingHours> {
    [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ]
    .into_iter()
    .map(|day| {
        if closed.contains(&day) {
            WorkingHours::closed(day)
        } else {
            WorkingHours::open(day, opens, closes)
        }
    })
    .collect()
}

fn service(
    id: &str,
    professional_id: &str,
    name: &str,
    price: i64,
    duration_minutes: u32,
    category: &str,
) -> Service {
    Service {
        id: id.into(),
        professional_id: professional_id.into(),
        name: name.into(),
        description: None,
        price: Decimal::from(price),
        duration_minutes,
        category: Some(category.into()),
        hair_prices: None,
        is_active: true,
    }
}

fn hair(small: i64, medium: i64, large: i64) -> Option<HairPrices> {
    Some(HairPrices {
        small: Decimal::from(small),
        medium: Decimal::from(medium),
        large: Decimal::from(large),
    })
}

fn review(
    id: &str,
    professional_id: &str,
    client_name: &str,
    rating: u8,
    comment: &str,
    created_at: DateTime<Utc>,
) -> Review {
    Review {
        id: id.into(),
        professional_id: professional_id.into(),
        client_id: format!("client-{id}"),
        client_name: client_name.into(),
        service_id: None,
        service_name: None,
        rating,
        comment: comment.into(),
        created_at,
        liked: false,
    }
}

fn accounts(now: DateTime<Utc>) -> Vec<Account> {
    vec![
        Account {
            user: User {
                id: CLIENT_ID.into(),
                name: "Maria Souza".into(),
                email: CLIENT_EMAIL.into(),
                phone: "11912345678".into(),
                user_type: UserType::Client,
                professional_id: None,
                addresses: vec![Address {
                    id: "addr-1".into(),
                    street: "Rua Augusta".into(),
                    number: "1500".into(),
                    complement: Some("Apto 52".into()),
                    district: "Consolação".into(),
                    city: "São Paulo".into(),
                    state: "SP".into(),
                    zip_code: "01304-001".into(),
                    is_default: true,
                }],
                created_at: now - Duration::days(90),
            },
            password: PASSWORD.into(),
        },
        Account {
            user: User {
                id: PROFESSIONAL_USER_ID.into(),
                name: "Ana Oliveira".into(),
                email: PROFESSIONAL_EMAIL.into(),
                phone: "11987654321".into(),
                user_type: UserType::Professional,
                professional_id: Some("pro-ana".into()),
                addresses: vec![],
                created_at: now - Duration::days(400),
            },
            password: PASSWORD.into(),
        },
    ]
}

fn professionals(now: DateTime<Utc>) -> Vec<Professional> {
    let weekdays = week(at(9, 0), at(18, 0), &[Weekday::Sun]);

    vec![
        Professional {
            id: "pro-ana".into(),
            name: "Ana Oliveira".into(),
            specialty: "Trancista".into(),
            bio: Some("Especialista em tranças afro há 10 anos.".into()),
            profile_image: "/images/professionals/ana.jpg".into(),
            cover_image: Some("/images/covers/ana.jpg".into()),
            rating: 4.5,
            review_count: 2,
            location: Location {
                district: "Pinheiros".into(),
                zone: "Zona Oeste".into(),
                address: Some("Rua dos Pinheiros, 870".into()),
            },
            offers_home_service: true,
            home_service_fee: Decimal::from(50),
            contact: Some(Contact {
                phone: "11987654321".into(),
                email: PROFESSIONAL_EMAIL.into(),
                instagram: Some("@ana.trancas".into()),
            }),
            working_hours: weekdays.clone(),
            services: vec![
                Service {
                    description: Some("Tranças box soltas, comprimento à escolha.".into()),
                    hair_prices: hair(60, 80, 120),
                    ..service("svc-box-braids", "pro-ana", "Box Braids", 250, 180, "trancas")
                },
                Service {
                    hair_prices: hair(40, 60, 90),
                    ..service("svc-nago", "pro-ana", "Tranças Nagô", 120, 120, "trancas")
                },
                service("svc-manutencao", "pro-ana", "Manutenção de tranças", 80, 60, "trancas"),
            ],
            reviews: vec![
                review(
                    "rev-1",
                    "pro-ana",
                    "Juliana M.",
                    5,
                    "Tranças perfeitas, super recomendo!",
                    now - Duration::days(12),
                ),
                review(
                    "rev-2",
                    "pro-ana",
                    "Patrícia R.",
                    4,
                    "Ótimo trabalho, só atrasou um pouco.",
                    now - Duration::days(30),
                ),
            ],
            categories: Vec::new(),
            is_verified: true,
        },
        Professional {
            id: "pro-carla".into(),
            name: "Carla Santos".into(),
            specialty: "Manicure".into(),
            bio: Some("Unhas em gel e nail art.".into()),
            profile_image: "/images/professionals/carla.jpg".into(),
            cover_image: None,
            rating: 4.7,
            review_count: 18,
            location: Location {
                district: "Vila Mariana".into(),
                zone: "Zona Sul".into(),
                address: None,
            },
            offers_home_service: false,
            home_service_fee: Decimal::ZERO,
            contact: None,
            working_hours: week(at(10, 0), at(19, 0), &[Weekday::Sun, Weekday::Mon]),
            services: vec![
                service("svc-manicure", "pro-carla", "Manicure", 40, 45, "unhas"),
                service("svc-pedicure", "pro-carla", "Pedicure", 50, 60, "unhas"),
                service("svc-gel", "pro-carla", "Alongamento em gel", 150, 120, "unhas"),
            ],
            reviews: vec![],
            categories: Vec::new(),
            is_verified: true,
        },
        Professional {
            id: "pro-juliana".into(),
            name: "Juliana Costa".into(),
            specialty: "Maquiadora".into(),
            bio: Some("Maquiagem social e para noivas.".into()),
            profile_image: "/images/professionals/juliana.jpg".into(),
            cover_image: None,
            rating: 4.9,
            review_count: 42,
            location: Location {
                district: "Tatuapé".into(),
                zone: "Zona Leste".into(),
                address: None,
            },
            offers_home_service: true,
            home_service_fee: Decimal::from(40),
            contact: None,
            working_hours: weekdays.clone(),
            services: vec![
                service("svc-make-social", "pro-juliana", "Maquiagem social", 180, 90, "maquiagem"),
                service(
                    "svc-make-noiva",
                    "pro-juliana",
                    "Maquiagem para noivas",
                    450,
                    150,
                    "maquiagem",
                ),
            ],
            reviews: vec![],
            categories: Vec::new(),
            is_verified: true,
        },
        Professional {
            id: "pro-beatriz".into(),
            name: "Beatriz Lima".into(),
            specialty: "Cabeleireira".into(),
            bio: None,
            profile_image: "/images/professionals/beatriz.jpg".into(),
            cover_image: None,
            rating: 4.6,
            review_count: 9,
            location: Location {
                district: "Moema".into(),
                zone: "Zona Sul".into(),
                address: None,
            },
            offers_home_service: true,
            home_service_fee: Decimal::from(60),
            contact: None,
            working_hours: weekdays,
            services: vec![
                service("svc-escova", "pro-beatriz", "Escova", 70, 60, "cabelo"),
                service("svc-corte", "pro-beatriz", "Corte feminino", 90, 60, "cabelo"),
                service("svc-hidratacao", "pro-beatriz", "Hidratação", 110, 90, "cabelo"),
            ],
            reviews: vec![],
            categories: Vec::new(),
            is_verified: false,
        },
        Professional {
            id: "pro-fernanda".into(),
            name: "Fernanda Alves".into(),
            specialty: "Designer de sobrancelhas".into(),
            bio: None,
            profile_image: "/images/professionals/fernanda.jpg".into(),
            cover_image: None,
            rating: 4.3,
            review_count: 5,
            location: Location {
                district: "Santana".into(),
                zone: "Zona Norte".into(),
                address: None,
            },
            offers_home_service: false,
            home_service_fee: Decimal::ZERO,
            contact: None,
            working_hours: week(at(9, 0), at(17, 0), &[Weekday::Sun]),
            services: vec![
                service(
                    "svc-design",
                    "pro-fernanda",
                    "Design de sobrancelhas",
                    45,
                    30,
                    "sobrancelhas",
                ),
                service("svc-henna", "pro-fernanda", "Henna", 60, 45, "sobrancelhas"),
            ],
            reviews: vec![],
            categories: Vec::new(),
            is_verified: true,
        },
    ]
}

fn appointment(
    id: &str,
    professional: (&str, &str),
    service: (&str, &str, i64),
    start: DateTime<Utc>,
    minutes: i64,
    status: AppointmentStatus,
    now: DateTime<Utc>,
) -> Appointment {
    Appointment {
        id: id.into(),
        client_id: CLIENT_ID.into(),
        client_name: "Maria Souza".into(),
        professional_id: professional.0.into(),
        professional_name: professional.1.into(),
        service_id: service.0.into(),
        service_name: service.1.into(),
        start,
        end: start + Duration::minutes(minutes),
        status,
        total_price: Decimal::from(service.2),
        is_home_service: false,
        address: None,
        use_own_hair: true,
        hair_length: None,
        allergies: None,
        notes: None,
        cancel_reason: None,
        created_at: now - Duration::days(3),
        updated_at: now - Duration::days(3),
    }
}

fn appointments(now: DateTime<Utc>) -> Vec<Appointment> {
    let ana = ("pro-ana", "Ana Oliveira");
    let carla = ("pro-carla", "Carla Santos");
    vec![
        appointment(
            "apt-1",
            ana,
            ("svc-manutencao", "Manutenção de tranças", 80),
            day_at(now, 2, 10),
            60,
            AppointmentStatus::Confirmed,
            now,
        ),
        appointment(
            "apt-2",
            carla,
            ("svc-manicure", "Manicure", 40),
            day_at(now, 3, 15),
            45,
            AppointmentStatus::Confirmed,
            now,
        ),
        appointment(
            "apt-3",
            ana,
            ("svc-nago", "Tranças Nagô", 120),
            day_at(now, -7, 9),
            120,
            AppointmentStatus::Completed,
            now,
        ),
        Appointment {
            cancel_reason: Some("Imprevisto".into()),
            ..appointment(
                "apt-4",
                carla,
                ("svc-pedicure", "Pedicure", 50),
                day_at(now, -2, 11),
                60,
                AppointmentStatus::Cancelled,
                now,
            )
        },
    ]
}

fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let entry = |id: &str, user_id: &str, title: &str, kind, status, hours_ago| Notification {
        id: id.into(),
        user_id: user_id.into(),
        title: title.into(),
        message: None,
        kind,
        status,
        created_at: now - Duration::hours(hours_ago),
    };
    vec![
        entry(
            "ntf-1",
            CLIENT_ID,
            "Agendamento confirmado",
            NotificationKind::Appointment,
            NotificationStatus::Unread,
            2,
        ),
        entry(
            "ntf-2",
            CLIENT_ID,
            "Avalie seu último atendimento",
            NotificationKind::Review,
            NotificationStatus::Unread,
            30,
        ),
        entry(
            "ntf-3",
            CLIENT_ID,
            "Bem-vinda ao Agenda Livre",
            NotificationKind::System,
            NotificationStatus::Read,
            24 * 90,
        ),
        entry(
            "ntf-4",
            PROFESSIONAL_USER_ID,
            "Novo agendamento",
            NotificationKind::Appointment,
            NotificationStatus::Unread,
            5,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_professional_account_links_to_profile() {
        let data = seed();
        let account = data.account_by_email(PROFESSIONAL_EMAIL).unwrap();
        let pro_id = account.user.professional_id.as_deref().unwrap();
        assert_eq!(data.professional(pro_id).unwrap().name, "Ana Oliveira");
    }

    #[test]
    fn test_categories_come_from_services() {
        let data = seed();
        let carla = data.professional("pro-carla").unwrap();
        assert_eq!(carla.categories, vec!["unhas".to_string()]);
        assert!(data.professionals.iter().all(|p| !p.categories.is_empty()));
    }

    #[test]
    fn test_seeded_ratings_match_reviews() {
        let data = seed();
        let ana = data.professional("pro-ana").unwrap();
        assert_eq!(ana.review_count as usize, ana.reviews.len());
        let braids = ana.service("svc-box-braids").unwrap();
        assert!(braids.has_hair_option());
    }
}
