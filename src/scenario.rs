//! The cloud design crew
//!
//! A Principal Cloud Architect drafts an architecture for an e-commerce
//! migration, then a Lead DevSecOps Engineer audits that design.

use std::sync::Arc;

use crate::agent::AgentSpec;
use crate::crew::{Crew, Process};
use crate::llm::LlmProvider;
use crate::task::TaskSpec;

pub const ARCHITECT_ROLE: &str = "Principal Cloud Architect";
pub const ARCHITECT_GOAL: &str = "Design highly scalable, resilient, and cost-effective cloud \
infrastructures based on user requirements.";
pub const ARCHITECT_BACKSTORY: &str = "You are a seasoned cloud architect with 15+ years of \
experience across AWS, GCP, and Azure. You excel at designing modern microservices, serverless \
architectures, and event-driven systems. Your primary focus is ensuring the system can handle \
massive scale while keeping latency low.";

pub const SECURITY_ROLE: &str = "Lead DevSecOps Engineer";
pub const SECURITY_GOAL: &str = "Rigorously review cloud architectures to identify \
vulnerabilities, ensure compliance, and enforce zero-trust security.";
pub const SECURITY_BACKSTORY: &str = "You are a paranoid but brilliant cybersecurity veteran. \
You specialize in cloud security posture management, IAM least-privilege policies, network \
isolation, and data encryption. You view every architecture through the lens of a potential \
attacker and fix flaws before deployment.";

/// The system the crew is asked to design
pub const PROJECT_SCENARIO: &str = "A global e-commerce platform transitioning from a monolith \
to microservices. It requires secure user authentication, a high-throughput inventory \
management system, and seamless integration with third-party payment gateways. It anticipates \
massive traffic spikes during holiday sales.";

pub const DESIGN_EXPECTED_OUTPUT: &str = "A detailed Architectural Design Document outlining \
services, data flow, and scaling strategies.";

pub const REVIEW_DESCRIPTION: &str = "Critically review the Architectural Design Document \
produced by the Principal Cloud Architect. Identify at least 3 potential security \
vulnerabilities or single points of failure. Provide concrete, actionable remediations for each \
vulnerability (e.g., adding WAF, adjusting VPC peering, enforcing KMS encryption).";

pub const REVIEW_EXPECTED_OUTPUT: &str = "A Security Audit Report listing vulnerabilities found, \
risk severity, and mandatory architecture modifications.";

pub fn cloud_architect(llm: Arc<dyn LlmProvider>) -> AgentSpec {
    AgentSpec::new(ARCHITECT_ROLE, ARCHITECT_GOAL, ARCHITECT_BACKSTORY, llm)
}

pub fn devsecops_engineer(llm: Arc<dyn LlmProvider>) -> AgentSpec {
    AgentSpec::new(SECURITY_ROLE, SECURITY_GOAL, SECURITY_BACKSTORY, llm)
}

/// Instruction for the architecture task, with the scenario embedded
pub fn design_description(scenario: &str) -> String {
    format!(
        "Analyze the following project scenario: '{}'.\n\
         Create a comprehensive cloud architecture design. You must specify the cloud provider \
         (or multi-cloud), compute resources, databases, caching layers, message queues, and \
         content delivery networks. Justify why you chose these specific services.",
        scenario
    )
}

/// Build the two-agent crew with both agents bound to `llm`
pub fn cloud_design_crew(llm: Arc<dyn LlmProvider>) -> Crew {
    cloud_design_crew_for(PROJECT_SCENARIO, llm)
}

/// Same crew, pointed at a different scenario
pub fn cloud_design_crew_for(scenario: &str, llm: Arc<dyn LlmProvider>) -> Crew {
    let architect = Arc::new(cloud_architect(llm.clone()));
    let security = Arc::new(devsecops_engineer(llm));

    let design_task = TaskSpec::new(
        design_description(scenario),
        DESIGN_EXPECTED_OUTPUT,
        architect.clone(),
    );
    let review_task = TaskSpec::new(REVIEW_DESCRIPTION, REVIEW_EXPECTED_OUTPUT, security.clone());

    Crew::new(vec![architect, security], vec![design_task, review_task])
        .with_process(Process::Sequential)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;
    use anyhow::Result;
    use async_trait::async_trait;

    struct NullProvider;

    #[async_trait]
    impl LlmProvider for NullProvider {
        async fn send_message(
            &self,
            _user_message: &str,
            _history: &[Message],
            _system_prompt: Option<&str>,
        ) -> Result<String> {
            Ok(String::new())
        }

        fn model(&self) -> String {
            "null".to_string()
        }

        fn provider_name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_crew_shape() {
        let crew = cloud_design_crew(Arc::new(NullProvider));
        assert!(crew.validate().is_ok());
        assert_eq!(crew.agents().len(), 2);
        assert_eq!(crew.tasks().len(), 2);
        assert_eq!(crew.process(), Process::Sequential);

        let tasks = crew.tasks();
        assert_eq!(tasks[0].agent().role(), ARCHITECT_ROLE);
        assert_eq!(tasks[1].agent().role(), SECURITY_ROLE);
        assert!(tasks[0].description().contains(PROJECT_SCENARIO));
        assert!(crew.agents().iter().all(|a| !a.allow_delegation()));
    }

    #[test]
    fn test_custom_scenario() {
        let crew = cloud_design_crew_for("A ride-sharing backend", Arc::new(NullProvider));
        assert!(crew.tasks()[0]
            .description()
            .starts_with("Analyze the following project scenario: 'A ride-sharing backend'."));
    }
}
