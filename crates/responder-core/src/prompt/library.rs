//! Built-in quick prompts, one set per role.

use serde::Serialize;

use crate::profile::UserRole;

/// A canned client-message starter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickPrompt {
    pub title: &'static str,
    pub prompt: &'static str,
}

const fn quick(title: &'static str, prompt: &'static str) -> QuickPrompt {
    QuickPrompt { title, prompt }
}

const FREELANCER: &[QuickPrompt] = &[
    quick(
        "Project Inquiry",
        "A potential client is asking about my availability and rates for a new web development project.",
    ),
    quick(
        "Quote Request",
        "A client gave a vague project description and wants a price. I need to ask clarifying questions before providing a quote.",
    ),
    quick(
        "Handle Scope Creep",
        "A client is asking for more work than was agreed upon. I need to politely address this and suggest a contract amendment.",
    ),
    quick(
        "Suggest Improvement",
        "I've identified a way to improve the client's project. I want to propose this idea, explaining its benefits.",
    ),
    quick(
        "Weekly Progress Update",
        "It's time for a weekly progress report. Summarize completed tasks, next steps, and any blockers.",
    ),
    quick(
        "Project Handover",
        "The project is complete. I need to send a final email with deliverables and ask for a testimonial.",
    ),
];

const STUDENT: &[QuickPrompt] = &[
    quick(
        "Request Extension",
        "I need to email my professor to respectfully request an extension for an upcoming assignment due to unforeseen circumstances.",
    ),
    quick(
        "Ask for Clarification",
        "I want to ask my TA for clarification on a concept from the last lecture that I'm struggling with.",
    ),
    quick(
        "Recommendation Letter",
        "I need to ask a professor for a strong letter of recommendation for a graduate school application.",
    ),
    quick(
        "Networking Outreach",
        "I'm reaching out to an alum in my field to ask for a brief informational interview about their career path.",
    ),
    quick(
        "Form a Study Group",
        "I want to post a message to my classmates to see who is interested in forming a study group for the final exam.",
    ),
    quick(
        "Grade Inquiry",
        "I have a question about my grade on the recent exam and would like to respectfully inquire about it with the professor.",
    ),
];

const BUSINESS_OWNER: &[QuickPrompt] = &[
    quick(
        "Handle Negative Review",
        "A customer left a negative review online. I need to draft a professional public response that addresses their concerns.",
    ),
    quick(
        "Partnership Proposal",
        "I'm reaching out to a potential partner to propose a collaboration that would be mutually beneficial.",
    ),
    quick(
        "Polite Invoice Reminder",
        "A client's invoice is past due. I need to send a polite reminder to follow up on the payment.",
    ),
    quick(
        "Job Applicant Rejection",
        "We've chosen another candidate for a role. I need to send a polite and encouraging rejection email to an applicant.",
    ),
    quick(
        "Internal Announcement",
        "I need to announce a new company-wide policy to all employees in a clear and positive way.",
    ),
    quick(
        "Vendor Inquiry",
        "I need to contact a potential new vendor to inquire about their services, capabilities, and pricing structure.",
    ),
];

/// Quick prompts offered for `role`.
pub fn prompt_library(role: UserRole) -> &'static [QuickPrompt] {
    match role {
        UserRole::Freelancer => FREELANCER,
        UserRole::Student => STUDENT,
        UserRole::BusinessOwner => BUSINESS_OWNER,
    }
}

/// Looks up a quick prompt by title, ignoring case.
pub fn find_quick_prompt(role: UserRole, title: &str) -> Option<&'static QuickPrompt> {
    let title = title.trim();
    prompt_library(role)
        .iter()
        .find(|p| p.title.eq_ignore_ascii_case(title))
}
