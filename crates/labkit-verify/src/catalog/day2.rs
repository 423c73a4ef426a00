//! Day 2: labs 6-11, customer intelligence through predictive analytics.

use labkit_graph::Plugin;
use serde_json::json;

use super::LabSuite;
use crate::check::{Check, Expect, QuerySpec};

pub(super) fn suites() -> Vec<LabSuite> {
    vec![lab06(), lab07(), lab08(), lab09(), lab10(), lab11()]
}

fn lab06() -> LabSuite {
    LabSuite::new(
        6,
        "Advanced Customer Intelligence & Segmentation",
        "280 nodes, 380 relationships",
        vec![
            Check::total_nodes(280),
            Check::total_relationships(250),
            Check::min_nodes("LifetimeValueModel", 10),
            Check::min_nodes("Commission", 5),
            Check::min_nodes("BehavioralSegment", 10),
            Check::min_nodes("CustomerJourney", 10),
            Check::informational(
                "marketing campaigns",
                "MATCH (mc:MarketingCampaign) RETURN count(mc) AS campaigns",
            ),
            Check::informational(
                "ltv models with current value",
                "MATCH (ltv:LifetimeValueModel)
                 WHERE ltv.current_ltv IS NOT NULL
                 RETURN count(ltv) AS complete_ltv_models",
            ),
            Check::informational(
                "behavioral tiers",
                "MATCH (bs:BehavioralSegment)
                 RETURN bs.behavioral_tier AS tier, count(*) AS cnt
                 ORDER BY cnt DESC",
            ),
            Check::query(
                "customer journeys",
                QuerySpec::count_at_least(
                    "MATCH (cj:CustomerJourney) RETURN count(cj) AS journeys",
                    "journeys",
                    10,
                ),
            ),
            Check::query(
                "commission tracking",
                QuerySpec::count_at_least(
                    "MATCH (a:Agent)-[:EARNED_COMMISSION]->(c:Commission)
                     RETURN count(*) AS commission_relationships",
                    "commission_relationships",
                    5,
                ),
            ),
            Check::query(
                "ltv projections",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HAS_LTV_MODEL]->(ltv:LifetimeValueModel)
                     RETURN c.customer_number AS customer,
                            ltv.current_ltv AS current_ltv,
                            ltv.predicted_ltv AS predicted_ltv,
                            ltv.retention_probability AS retention,
                            (ltv.predicted_ltv - ltv.current_ltv) AS growth_potential
                     ORDER BY growth_potential DESC
                     LIMIT 5",
                )
                .at_least(5)
                .expect(Expect::NotNull("growth_potential")),
            ),
            Check::query(
                "segment analysis",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HAS_PROFILE]->(cp:CustomerProfile)
                     WITH cp.customer_segment AS segment, count(c) AS customer_count
                     RETURN segment, customer_count
                     ORDER BY customer_count DESC",
                )
                .at_least(1),
            ),
            Check::query(
                "campaign targeting",
                QuerySpec::new(
                    "MATCH (mc:MarketingCampaign)
                     WHERE size(mc.target_segments) > 0
                     RETURN mc.campaign_name AS campaign,
                            mc.target_segments AS segments,
                            mc.expected_response_rate AS response_rate,
                            mc.budget AS budget
                     ORDER BY response_rate DESC",
                )
                .at_least(3)
                .expect(Expect::NonEmptyList("segments")),
            ),
            Check::query(
                "journey stages",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HAS_JOURNEY]->(cj:CustomerJourney)
                     RETURN c.customer_number AS customer, cj.current_stage AS current
                     LIMIT 5",
                )
                .at_least(1),
            ),
            Check::query(
                "commission totals",
                QuerySpec::new(
                    "MATCH (a:Agent)-[:EARNED_COMMISSION]->(c:Commission)
                     RETURN a.agent_id AS agent,
                            count(c) AS commission_count,
                            sum(c.commission_amount) AS total_earned,
                            avg(c.commission_amount) AS avg_commission
                     ORDER BY total_earned DESC",
                )
                .at_least(1)
                .expect(Expect::Gt("commission_count", 0.0)),
            ),
            Check::summary(vec![
                "LifetimeValueModel",
                "BehavioralSegment",
                "MarketingCampaign",
            ]),
        ],
    )
}

fn lab07() -> LabSuite {
    LabSuite::new(
        7,
        "Graph Algorithms for Insurance",
        "350 nodes, 450 relationships",
        vec![
            Check::total_nodes(350),
            Check::total_relationships(400),
            Check::optional(
                "graph data science library",
                Plugin::Gds,
                QuerySpec::new("CALL gds.version() YIELD version RETURN version")
                    .at_least(1)
                    .expect(Expect::NotNull("version")),
            ),
            Check::query(
                "projection source relationships",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     RETURN count(*) AS relationship_count",
                )
                .exactly(1)
                .expect(Expect::Gt("relationship_count", 0.0)),
            ),
            Check::informational(
                "customer referrals",
                "MATCH (c:Customer)
                 WHERE EXISTS { (c)-[:REFERRED]->(:Customer) }
                 RETURN count(c) AS customers_with_referrals",
            ),
            Check::query(
                "community detection input",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     WITH count(DISTINCT c) AS customers, count(DISTINCT p) AS policies
                     RETURN customers, policies",
                )
                .exactly(1)
                .expect(Expect::Ge("customers", 10.0)),
            ),
            Check::informational(
                "customer paths",
                "MATCH path = (c1:Customer)-[*1..3]-(c2:Customer)
                 WHERE c1 <> c2
                 RETURN count(path) AS path_count",
            ),
            Check::query(
                "network density",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WITH count(c) AS customer_count
                     MATCH ()-[r]->()
                     WITH customer_count, count(r) AS total_relationships
                     RETURN customer_count,
                            total_relationships,
                            CASE WHEN customer_count > 0
                                 THEN toFloat(total_relationships) / customer_count
                                 ELSE 0.0
                            END AS density_ratio",
                )
                .exactly(1)
                .expect(Expect::Gt("density_ratio", 5.0)),
            ),
            Check::query(
                "agent network",
                QuerySpec::new(
                    "MATCH (a:Agent)-[:SERVICES]->(c:Customer)
                     WITH a, count(c) AS customer_count
                     RETURN avg(customer_count) AS avg_customers_per_agent,
                            max(customer_count) AS max_customers_per_agent",
                )
                .exactly(1)
                .expect(Expect::Gt("avg_customers_per_agent", 0.0)),
            ),
            Check::query(
                "policy network",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     WITH c, count(p) AS policy_count
                     RETURN avg(policy_count) AS avg_policies_per_customer,
                            max(policy_count) AS max_policies",
                )
                .exactly(1)
                .expect(Expect::Gt("avg_policies_per_customer", 0.0)),
            ),
            Check::query(
                "degree statistics",
                QuerySpec::new(
                    "MATCH (c:Customer)-[r]-()
                     WITH c, count(r) AS degree
                     RETURN avg(degree) AS avg_degree,
                            max(degree) AS max_degree,
                            min(degree) AS min_degree",
                )
                .exactly(1)
                .expect(Expect::Gt("avg_degree", 0.0))
                .expect(Expect::GeColumn("max_degree", "min_degree")),
            ),
            Check::informational(
                "shortest path",
                "MATCH (c1:Customer), (c2:Customer)
                 WHERE c1 <> c2
                 WITH c1, c2 LIMIT 1
                 MATCH path = shortestPath((c1)-[*..5]-(c2))
                 RETURN length(path) AS path_length",
            ),
            Check::query(
                "degree centrality",
                QuerySpec::new(
                    "MATCH (a:Agent)-[r:SERVICES]->(:Customer)
                     WITH a, count(r) AS customer_count
                     RETURN a.agent_id AS agent, customer_count AS degree
                     ORDER BY degree DESC
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::Gt("degree", 0.0)),
            ),
            Check::summary(vec!["Customer", "Agent"]),
        ],
    )
}

fn lab08() -> LabSuite {
    LabSuite::new(
        8,
        "Performance Optimization",
        "400 nodes, 500 relationships",
        vec![
            Check::total_nodes(400),
            Check::total_relationships(500),
            Check::min_indexes(None, 5),
            Check::min_constraints(None, 5),
            Check::min_indexes(Some("customer"), 1),
            Check::min_indexes(Some("policy"), 1),
            Check::timed(
                "baseline traversal speed",
                "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                 RETURN c.customer_number AS customer_number, p.policy_number AS policy_number
                 LIMIT 100",
                5000,
                false,
            ),
            Check::timed(
                "indexed lookup speed",
                "MATCH (c:Customer {customer_number: 'CUST-001234'})
                 RETURN c.customer_number AS customer_number, c.first_name AS first_name",
                1000,
                true,
            ),
            Check::timed(
                "aggregation speed",
                "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                 RETURN c.risk_tier AS risk_tier,
                        count(p) AS policy_count,
                        sum(p.annual_premium) AS total_premium",
                5000,
                true,
            ),
            Check::optional(
                "database statistics",
                Plugin::Apoc,
                QuerySpec::new(
                    "CALL apoc.meta.stats() YIELD nodeCount, relCount
                     RETURN nodeCount, relCount",
                )
                .at_least(1)
                .expect(Expect::Gt("nodeCount", 0.0)),
            ),
            Check::summary(Vec::new()),
        ],
    )
}

fn lab09() -> LabSuite {
    LabSuite::new(
        9,
        "Advanced Fraud Detection & Investigation Tools",
        "500 nodes, 600 relationships",
        vec![
            Check::total_nodes(450),
            Check::total_relationships(400),
            Check::min_nodes("Investigator", 2),
            Check::min_nodes("FraudInvestigation", 1),
            Check::min_nodes("FraudAlert", 1),
            Check::query(
                "claims with fraud scores",
                QuerySpec::count_at_least(
                    "MATCH (cl:Claim)
                     WHERE cl.fraud_score IS NOT NULL
                     RETURN count(cl) AS claims_with_scores",
                    "claims_with_scores",
                    3,
                ),
            ),
            Check::informational(
                "same-day incidents",
                "MATCH (c1:Customer)-[:FILED_CLAIM]->(cl1:Claim)
                 MATCH (c2:Customer)-[:FILED_CLAIM]->(cl2:Claim)
                 WHERE c1 <> c2
                   AND cl1.incident_date = cl2.incident_date
                 RETURN count(*) AS potential_patterns",
            ),
            Check::informational(
                "investigation assignments",
                "MATCH (i:Investigator)-[:INVESTIGATES]->(fi:FraudInvestigation)
                 RETURN count(*) AS investigation_relationships",
            ),
            Check::informational(
                "repeat claimants",
                "MATCH (c:Customer)-[:FILED_CLAIM]->(cl:Claim)
                 WITH c, count(cl) AS claim_count
                 WHERE claim_count > 1
                 RETURN count(c) AS customers_with_multiple_claims",
            ),
            Check::informational(
                "shared contact details",
                "MATCH (c1:Customer), (c2:Customer)
                 WHERE c1 <> c2
                   AND (c1.address = c2.address OR c1.phone = c2.phone OR c1.email = c2.email)
                 RETURN count(*) AS shared_info_pairs",
            ),
            Check::informational(
                "high fraud score patterns",
                "MATCH (cl:Claim)
                 WHERE cl.fraud_score > 0.5
                 WITH cl.claim_type AS type,
                      count(cl) AS high_risk_claims,
                      avg(cl.fraud_score) AS avg_score
                 RETURN type, high_risk_claims, round(avg_score * 100) / 100 AS avg_score
                 ORDER BY high_risk_claims DESC",
            ),
            Check::informational(
                "claim anomalies",
                "MATCH (c:Customer)-[:FILED_CLAIM]->(cl:Claim)
                 WITH c, count(cl) AS claim_count, sum(cl.claim_amount) AS total_claims
                 WHERE claim_count > 2 OR total_claims > 50000
                 RETURN c.customer_number AS customer,
                        claim_count,
                        total_claims AS total_amount
                 ORDER BY total_claims DESC",
            ),
            Check::informational(
                "fraud networks",
                "MATCH (c1:Customer)-[:FILED_CLAIM]->(cl1:Claim)
                 WHERE cl1.fraud_score > 0.3
                 OPTIONAL MATCH (c1)-[r]->(c2:Customer)
                 RETURN c1.customer_number AS customer,
                        count(DISTINCT cl1) AS suspicious_claims,
                        count(DISTINCT c2) AS connected_customers
                 ORDER BY suspicious_claims DESC
                 LIMIT 5",
            ),
            Check::summary(vec!["Investigator", "FraudInvestigation", "FraudAlert"]),
        ],
    )
}

fn lab10() -> LabSuite {
    LabSuite::new(
        10,
        "Compliance & Audit Trail Implementation",
        "550 nodes, 700 relationships",
        vec![
            Check::total_nodes(500),
            Check::total_relationships(400),
            Check::informational(
                "audit trail nodes",
                "MATCH (n:AuditTrail) RETURN count(n) AS audit_trails",
            ),
            Check::informational(
                "compliance records",
                "MATCH (n:ComplianceRecord) RETURN count(n) AS compliance_records",
            ),
            Check::informational(
                "regulatory reports",
                "MATCH (n:RegulatoryReport) RETURN count(n) AS regulatory_reports",
            ),
            Check::query(
                "audited entities",
                QuerySpec::count_at_least(
                    "MATCH (n)
                     WHERE n.created_at IS NOT NULL
                       AND n.created_by IS NOT NULL
                     RETURN count(n) AS entities_with_audit",
                    "entities_with_audit",
                    100,
                ),
            ),
            Check::query(
                "versioned entities",
                QuerySpec::count_at_least(
                    "MATCH (n)
                     WHERE n.version IS NOT NULL
                     RETURN count(n) AS entities_with_versions",
                    "entities_with_versions",
                    100,
                ),
            ),
            Check::informational(
                "data lineage",
                "MATCH (c:Customer)
                 WHERE c.created_by IS NOT NULL
                 WITH DISTINCT c.created_by AS source
                 RETURN count(source) AS data_sources",
            ),
            Check::informational(
                "new customers last year",
                "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                 WHERE p.effective_date >= date() - duration({days: 365})
                 RETURN count(DISTINCT c) AS new_customers_last_year",
            ),
            Check::informational(
                "premium by state",
                "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                 RETURN c.state AS state,
                        count(p) AS policy_count,
                        sum(p.annual_premium) AS total_premium",
            ),
            Check::query(
                "audit trail",
                QuerySpec::new(
                    "MATCH (n)
                     WHERE n.created_at IS NOT NULL
                     RETURN n.created_by AS source,
                            toString(n.created_at) AS timestamp,
                            count(n) AS entities_created
                     ORDER BY entities_created DESC
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::Gt("entities_created", 0.0)),
            ),
            Check::query(
                "version history",
                QuerySpec::new(
                    "MATCH (n)
                     WHERE n.version IS NOT NULL
                     WITH n.version AS version, count(n) AS cnt
                     RETURN version, cnt
                     ORDER BY cnt DESC",
                )
                .at_least(1),
            ),
            Check::query(
                "compliance report",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     WHERE p.effective_date >= date() - duration({days: 365})
                     WITH c.state AS state,
                          count(DISTINCT c) AS customers,
                          count(p) AS policies,
                          sum(p.annual_premium) AS premium
                     RETURN state, customers, policies, round(premium * 100) / 100 AS total_premium
                     ORDER BY total_premium DESC",
                )
                .at_least(1),
            ),
            Check::summary(vec!["AuditTrail", "ComplianceRecord", "RegulatoryReport"]),
        ],
    )
}

fn lab11() -> LabSuite {
    LabSuite::new(
        11,
        "Predictive Analytics & Machine Learning",
        "600 nodes, 750 relationships",
        vec![
            Check::total_nodes(600),
            Check::total_relationships(400),
            Check::informational("ml models", "MATCH (n:MLModel) RETURN count(n) AS ml_models"),
            Check::informational(
                "prediction results",
                "MATCH (n:PredictionResult) RETURN count(n) AS prediction_results",
            ),
            Check::query(
                "feature coverage",
                QuerySpec::count_at_least(
                    "MATCH (c:Customer)-[:HAS_PROFILE]->(profile:CustomerProfile)
                     WHERE profile.tenure_years IS NOT NULL
                       AND profile.policy_count IS NOT NULL
                       AND profile.total_claims IS NOT NULL
                       AND profile.credit_score IS NOT NULL
                     RETURN count(c) AS customers_with_features",
                    "customers_with_features",
                    10,
                ),
            ),
            Check::query(
                "churn predictions",
                QuerySpec::count_at_least(
                    "MATCH (pm:PredictiveModel)
                     WHERE pm.churn_probability IS NOT NULL
                     RETURN count(pm) AS models_with_churn",
                    "models_with_churn",
                    10,
                ),
            ),
            Check::query(
                "ltv predictions",
                QuerySpec::count_at_least(
                    "MATCH (ltv:LifetimeValueModel)
                     WHERE ltv.predicted_ltv IS NOT NULL
                     RETURN count(ltv) AS ltv_predictions",
                    "ltv_predictions",
                    10,
                ),
            ),
            Check::informational(
                "average cross-sell probability",
                "MATCH (pm:PredictiveModel)
                 WHERE pm.cross_sell_probability IS NOT NULL
                 RETURN avg(pm.cross_sell_probability) AS avg_cross_sell_prob",
            ),
            Check::query(
                "model confidence",
                QuerySpec::count_at_least(
                    "MATCH (pm:PredictiveModel)
                     WHERE pm.model_confidence IS NOT NULL
                     RETURN count(pm) AS models_with_confidence",
                    "models_with_confidence",
                    10,
                ),
            ),
            Check::query(
                "retention actions",
                QuerySpec::count_at_least(
                    "MATCH (pm:PredictiveModel)
                     WHERE size(pm.retention_actions) > 0
                     RETURN count(pm) AS models_with_actions",
                    "models_with_actions",
                    10,
                ),
            ),
            Check::query(
                "prediction pipeline",
                QuerySpec::count_at_least(
                    "MATCH (c:Customer)-[:HAS_PROFILE]->(profile:CustomerProfile)
                     MATCH (c)-[:HAS_PREDICTION]->(prediction:PredictiveModel)
                     MATCH (c)-[:HAS_RISK_ASSESSMENT]->(risk:RiskAssessment)
                     RETURN count(c) AS complete_pipelines",
                    "complete_pipelines",
                    10,
                ),
            ),
            Check::informational(
                "churn risk",
                "MATCH (c:Customer)-[:HAS_PREDICTION]->(pm:PredictiveModel)
                 WHERE pm.churn_probability > 0.5
                 RETURN c.customer_number AS customer,
                        pm.churn_probability AS churn_risk,
                        pm.retention_actions AS actions
                 ORDER BY churn_risk DESC
                 LIMIT 5",
            ),
            Check::query(
                "ltv forecast",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HAS_LTV_MODEL]->(ltv:LifetimeValueModel)
                     RETURN c.customer_number AS customer,
                            ltv.current_ltv AS current,
                            ltv.predicted_ltv AS predicted,
                            (ltv.predicted_ltv - ltv.current_ltv) AS growth
                     ORDER BY growth DESC
                     LIMIT 5",
                )
                .at_least(5),
            ),
            Check::informational(
                "cross-sell recommendations",
                "MATCH (c:Customer)-[:HAS_PREDICTION]->(pm:PredictiveModel)
                 WHERE pm.cross_sell_probability > 0.3
                 RETURN c.customer_number AS customer,
                        pm.cross_sell_probability AS probability,
                        pm.recommended_product AS product
                 ORDER BY probability DESC
                 LIMIT 5",
            ),
            Check::summary(vec![
                "Customer",
                "Policy",
                "Claim",
                "PredictiveModel",
                "LifetimeValueModel",
            ]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::check::CheckKind;

    #[test]
    fn test_day_two_numbers() {
        let numbers: Vec<u32> = suites().iter().map(|s| s.number.0).collect();
        assert_eq!(numbers, vec![6, 7, 8, 9, 10, 11]);
    }

    #[test]
    fn test_plugin_checks() {
        let plugins: Vec<Plugin> = suites()
            .into_iter()
            .flat_map(|s| s.checks)
            .filter_map(|c| match c.kind {
                CheckKind::Optional { plugin, .. } => Some(plugin),
                _ => None,
            })
            .collect();
        assert_eq!(plugins, vec![Plugin::Gds, Plugin::Apoc]);
    }

    #[test]
    fn test_indexed_lookup_requires_rows() {
        let lab8 = lab08();
        let timed: Vec<(u64, bool)> = lab8
            .checks
            .iter()
            .filter_map(|c| match c.kind {
                CheckKind::Timed {
                    max_ms,
                    require_rows,
                    ..
                } => Some((max_ms, require_rows)),
                _ => None,
            })
            .collect();
        assert_eq!(timed, vec![(5000, false), (1000, true), (5000, true)]);
    }
}
