//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::filters;

// =============================================================================
// Static page content
// =============================================================================

/// A step in the "How It Works" walkthrough.
pub struct HowItWorksStep {
    pub title: &'static str,
    pub description: &'static str,
    pub detail: &'static str,
}

/// A customer testimonial for the success stories section.
pub struct Testimonial {
    pub name: &'static str,
    pub role: &'static str,
    pub company: &'static str,
    pub content: &'static str,
    pub savings: &'static str,
}

/// One benefit bullet inside an audience card.
pub struct AudiencePoint {
    pub title: &'static str,
    pub description: &'static str,
}

/// An audience card ("For Families" / "For Businesses").
pub struct Audience {
    pub heading: &'static str,
    pub points: Vec<AudiencePoint>,
    pub quote: &'static str,
    pub attribution: &'static str,
}

fn how_it_works_steps() -> Vec<HowItWorksStep> {
    vec![
        HowItWorksStep {
            title: "Attach Device",
            description: "Magnetically attach AcuteMeter to your LPG cylinder base. No tools, no hassle.",
            detail: "The magnetic attachment system works with any standard LPG cylinder. Installation takes less than 30 seconds.",
        },
        HowItWorksStep {
            title: "Activate & Connect",
            description: "Send a simple USSD code to activate. Connects via GSM, WiFi, or Bluetooth.",
            detail: "Multiple connectivity options ensure you're always connected, even in remote areas.",
        },
        HowItWorksStep {
            title: "Monitor in Real-Time",
            description: "Track gas levels continuously through our mobile app or SMS updates.",
            detail: "Get precise readings updated every hour, with historical usage patterns and predictions.",
        },
        HowItWorksStep {
            title: "Receive Smart Alerts",
            description: "Get notified when it's time to refill or if a leak is detected.",
            detail: "Customizable alerts via SMS, app notifications, or USSD. Never miss an important update.",
        },
    ]
}

fn featured_testimonials() -> Vec<Testimonial> {
    vec![
        Testimonial {
            name: "James Okonjo",
            role: "Restaurant Owner",
            company: "Golden Spoon Restaurant",
            content: "AcuteMeter has revolutionized how we manage our gas supply. No more unexpected shortages during peak hours! Our customers are happier and our costs are down 30%.",
            savings: "GHS 2,000/month",
        },
        Testimonial {
            name: "Sarah Mensah",
            role: "Homeowner",
            company: "Family of 5",
            content: "The peace of mind knowing exactly when to refill and that there are no gas leaks is invaluable. My family feels so much safer now.",
            savings: "GHS 200/month",
        },
        Testimonial {
            name: "Daniel Kwesi",
            role: "Hotel Manager",
            company: "Accra Grand Hotel",
            content: "Managing multiple cylinders across our properties is now effortless. The ROI was immediate and our operational efficiency has improved dramatically.",
            savings: "GHS 5,000/month",
        },
    ]
}

fn audiences() -> Vec<Audience> {
    vec![
        Audience {
            heading: "For Families",
            points: vec![
                AudiencePoint {
                    title: "Never Miss Dinner",
                    description: "Get alerts before gas runs out during meal prep",
                },
                AudiencePoint {
                    title: "Family Safety",
                    description: "Instant leak detection protects your loved ones",
                },
                AudiencePoint {
                    title: "Save Money",
                    description: "Plan refills to avoid emergency premium prices",
                },
            ],
            quote: "Since using AcuteMeter, we've saved GHS 200 monthly by avoiding emergency refills and our family feels much safer.",
            attribution: "Sarah, Mother of 3",
        },
        Audience {
            heading: "For Businesses",
            points: vec![
                AudiencePoint {
                    title: "Fleet Management",
                    description: "Monitor multiple cylinders from one dashboard",
                },
                AudiencePoint {
                    title: "Operational Efficiency",
                    description: "Automate supply chain and prevent downtime",
                },
                AudiencePoint {
                    title: "Customer Satisfaction",
                    description: "Never disappoint customers due to gas shortages",
                },
            ],
            quote: "Our restaurant chain reduced gas-related downtime by 95% and saved GHS 2,000 monthly on emergency refills.",
            attribution: "James, Restaurant Owner",
        },
    ]
}

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    /// "How It Works" walkthrough steps.
    pub steps: Vec<HowItWorksStep>,
    /// Featured customer testimonials.
    pub testimonials: Vec<Testimonial>,
    /// Audience cards (families / businesses).
    pub audiences: Vec<Audience>,
}

/// Display the landing page.
#[instrument]
pub async fn home() -> impl IntoResponse {
    HomeTemplate {
        steps: how_it_works_steps(),
        testimonials: featured_testimonials(),
        audiences: audiences(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_home_renders_all_sections() {
        let html = HomeTemplate {
            steps: how_it_works_steps(),
            testimonials: featured_testimonials(),
            audiences: audiences(),
        }
        .render()
        .unwrap();

        assert!(html.contains("Never Run Out"));
        assert!(html.contains("How It Works"));
        assert!(html.contains("Attach Device"));
        assert!(html.contains("James Okonjo"));
        assert!(html.contains("For Families"));
        assert!(html.contains("For Businesses"));
        assert!(html.contains("/preorder"));
    }

    #[test]
    fn test_four_steps_in_order() {
        let steps = how_it_works_steps();
        assert_eq!(steps.len(), 4);
        assert_eq!(steps[0].title, "Attach Device");
        assert_eq!(steps[3].title, "Receive Smart Alerts");
    }
}
