use anyhow::Context as _;
use chrono::NaiveDate;
use serde::Serialize;
use tera::{Context, Tera};

use super::queries::{DashboardStats, SectionContent};
use crate::{
    models::roles::Role,
    protocol::Notice,
    session::Session,
    utils::{format_long_date, slugify},
};

pub const TITLE: &str = "Hospital Management System";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

impl NavItem {
    fn new<L: ToString, H: ToString>(label: L, href: H) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// Sidebar entries for whoever is signed in.
pub fn navigation(session: &Session) -> Vec<NavItem> {
    match session.user() {
        Some((_, role)) => {
            let mut items = vec![NavItem::new("Dashboard", "/dashboard")];
            items.extend(
                role.sections()
                    .iter()
                    .map(|section| NavItem::new(section, format!("/section/{}", slugify(section)))),
            );
            items
        }
        None => vec![
            NavItem::new("User Authentication", "/"),
            NavItem::new("About", "/about"),
            NavItem::new("Contact Us", "/contact"),
        ],
    }
}

#[derive(Serialize)]
struct UserView<'a> {
    username: &'a str,
    role: Role,
}

#[derive(Serialize)]
struct NoticeView<'a> {
    class: &'a str,
    message: &'a str,
}

#[derive(Serialize)]
struct Metric {
    label: &'static str,
    value: i64,
}

#[derive(Serialize)]
struct TableView {
    headers: &'static [&'static str],
    rows: Vec<Vec<String>>,
}

const APPOINTMENT_HEADERS: &[&str] = &["Appointment", "Patient", "Date", "Time", "Doctor", "Nurse"];
const HISTORY_HEADERS: &[&str] = &["Patient", "History"];

/// Page templates, compiled once at start-up. Every template is `.html`, so
/// Tera escapes whatever the context carries.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> anyhow::Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html")),
            ("auth.html", include_str!("../../templates/auth.html")),
            ("about.html", include_str!("../../templates/about.html")),
            ("contact.html", include_str!("../../templates/contact.html")),
            ("dashboard.html", include_str!("../../templates/dashboard.html")),
            ("section.html", include_str!("../../templates/section.html")),
        ])
        .context("Failed to load page templates")?;

        Ok(Self { tera })
    }

    fn page_context(session: &Session, active: &str, notice: Option<&Notice>) -> Context {
        let mut ctx = Context::new();
        ctx.insert("title", TITLE);
        ctx.insert("active", active);
        ctx.insert("nav", &navigation(session));
        ctx.insert(
            "user",
            &session
                .user()
                .map(|(username, role)| UserView { username, role }),
        );
        ctx.insert(
            "notice",
            &notice.map(|notice| NoticeView {
                class: notice.css_class(),
                message: notice.message(),
            }),
        );
        ctx
    }

    fn render(&self, name: &str, ctx: &Context) -> anyhow::Result<String> {
        self.tera
            .render(name, ctx)
            .with_context(|| format!("Failed to render {}", name))
    }

    pub fn auth_page(&self, notice: Option<&Notice>) -> anyhow::Result<String> {
        let mut ctx = Self::page_context(&Session::anonymous(), "User Authentication", notice);
        ctx.insert("roles", &Role::ALL);
        self.render("auth.html", &ctx)
    }

    pub fn about_page(&self) -> anyhow::Result<String> {
        let ctx = Self::page_context(&Session::anonymous(), "About", None);
        self.render("about.html", &ctx)
    }

    pub fn contact_page(&self, notice: Option<&Notice>) -> anyhow::Result<String> {
        let ctx = Self::page_context(&Session::anonymous(), "Contact Us", notice);
        self.render("contact.html", &ctx)
    }

    pub fn dashboard_page(
        &self,
        session: &Session,
        today: &NaiveDate,
        stats: &DashboardStats,
    ) -> anyhow::Result<String> {
        let mut ctx = Self::page_context(session, "Dashboard", None);
        ctx.insert("today", &format_long_date(today));
        ctx.insert(
            "metrics",
            &[
                Metric {
                    label: "Appointments",
                    value: stats.appointments,
                },
                Metric {
                    label: "Patients",
                    value: stats.patients,
                },
                Metric {
                    label: "Doctors",
                    value: stats.doctors,
                },
                Metric {
                    label: "Invoices",
                    value: stats.invoices,
                },
            ],
        );
        self.render("dashboard.html", &ctx)
    }

    pub fn section_page(
        &self,
        session: &Session,
        section: &str,
        content: &SectionContent,
    ) -> anyhow::Result<String> {
        let table = match content {
            SectionContent::NurseAppointments(rows) => Some(TableView {
                headers: APPOINTMENT_HEADERS,
                rows: rows
                    .iter()
                    .map(|row| {
                        vec![
                            row.appt_id.to_string(),
                            format!("{} {}", row.patient_fname, row.patient_lname),
                            row.date.clone(),
                            row.time.clone(),
                            row.doctor_name.clone(),
                            row.nurse_name.clone(),
                        ]
                    })
                    .collect(),
            }),
            SectionContent::PatientHistory(rows) => Some(TableView {
                headers: HISTORY_HEADERS,
                rows: rows
                    .iter()
                    .map(|row| vec![row.pat_name.clone().unwrap_or_default(), row.history.clone()])
                    .collect(),
            }),
            SectionContent::UnderConstruction => None,
        };

        let mut ctx = Self::page_context(session, section, None);
        ctx.insert("table", &table);
        self.render("section.html", &ctx)
    }

    pub fn not_found_page(&self, session: &Session) -> anyhow::Result<String> {
        let notice = Notice::warning("This page is not available for your role.");
        let ctx = Self::page_context(session, "Not Found", Some(&notice));
        self.render("base.html", &ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::views::PatientHistory;

    fn nurse() -> Session {
        Session::signed_in("Nina".to_string(), Role::Nurse, "t".to_string())
    }

    fn templates() -> Templates {
        Templates::new().unwrap()
    }

    #[test]
    fn anonymous_navigation() {
        let labels = navigation(&Session::anonymous())
            .into_iter()
            .map(|item| item.label)
            .collect::<Vec<_>>();
        assert_eq!(labels, vec!["User Authentication", "About", "Contact Us"]);
    }

    #[test]
    fn role_navigation_starts_with_dashboard() {
        let items = navigation(&nurse());
        assert_eq!(items[0], NavItem::new("Dashboard", "/dashboard"));
        assert_eq!(items[2], NavItem::new("Patient Care", "/section/patient-care"));
        assert_eq!(items.len(), 1 + Role::Nurse.sections().len());
    }

    #[test]
    fn auth_page_offers_every_role() {
        let html = templates()
            .auth_page(Some(&Notice::warning("Passwords do not match.")))
            .unwrap();
        for role in Role::ALL.iter() {
            assert!(html.contains(&format!(r#"<option value="{}">"#, role)));
        }
        assert!(html.contains(r#"<div class="warning-box">Passwords do not match.</div>"#));
        assert!(html.contains(r#"<li class="navigation-item active"><a href="/">User Authentication</a></li>"#));
        assert!(!html.contains("Logout"));
    }

    #[test]
    fn dashboard_greets_user_and_escapes_name() {
        let session = Session::signed_in("<b>x</b>".to_string(), Role::Admin, "t".to_string());
        let today = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        let stats = DashboardStats {
            appointments: 5,
            ..Default::default()
        };
        let html = templates().dashboard_page(&session, &today, &stats).unwrap();

        assert!(html.contains("Welcome back, &lt;b&gt;x&lt;&#x2F;b&gt;!"));
        assert!(!html.contains("<b>x</b>"));
        assert!(html.contains("Thursday, March 20, 2025"));
        assert!(html.contains(r#"<div class="metric-value">5</div>"#));
        assert!(html.contains("Logout"));
        assert!(html.contains(r#"href="/section/users""#));
    }

    #[test]
    fn history_table_escapes_cells() {
        let content = SectionContent::PatientHistory(vec![PatientHistory {
            id: 1,
            pat_name: Some("John Doe".to_string()),
            history: "<script>".to_string(),
        }]);
        let html = templates()
            .section_page(&nurse(), "Patient Care", &content)
            .unwrap();
        assert!(html.contains("<td>&lt;script&gt;</td>"));
        assert!(html.contains("<td>John Doe</td>"));
        assert!(!html.contains("No records."));
    }

    #[test]
    fn empty_tables_say_so() {
        let html = templates()
            .section_page(&nurse(), "Appointments", &SectionContent::NurseAppointments(vec![]))
            .unwrap();
        assert!(html.contains(r#"<td colspan="6">No records.</td>"#));
    }

    #[test]
    fn other_sections_are_under_construction() {
        let html = templates()
            .section_page(&nurse(), "Medication", &SectionContent::UnderConstruction)
            .unwrap();
        assert!(html.contains("The Medication page is under construction."));
    }

    #[test]
    fn not_found_keeps_the_role_menu() {
        let html = templates().not_found_page(&nurse()).unwrap();
        assert!(html.contains("This page is not available for your role."));
        assert!(html.contains("Welcome, Nina (Nurse)"));
    }
}
