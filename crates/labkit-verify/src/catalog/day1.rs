//! Day 1: labs 1-5, from first connection to the analytics foundation.

use serde_json::json;

use super::LabSuite;
use crate::check::{Check, CheckKind, Expect, QuerySpec};

pub(super) fn suites() -> Vec<LabSuite> {
    vec![lab01(), lab02(), lab03(), lab04(), lab05()]
}

const CORE_LABELS: &[&str] = &["Customer", "Policy", "Agent", "Product"];

fn lab01() -> LabSuite {
    LabSuite::new(
        1,
        "Enterprise Setup & Docker Connection",
        "10 nodes, 15 relationships",
        vec![
            Check::connectivity(),
            Check::total_nodes(10),
            Check::total_relationships(15),
            Check::min_nodes("Customer", 3),
            Check::min_nodes("Policy", 3),
            Check::min_nodes("Agent", 2),
            Check::min_nodes("Product", 2),
            Check::node_exists("Customer", "customer_number", "CUST-001234"),
            Check::node_exists("Customer", "customer_number", "CUST-001235"),
            Check::node_exists("Customer", "customer_number", "CUST-001236"),
            Check::relationship_exists("Customer", "HOLDS_POLICY", "Policy"),
            Check::relationship_exists("Agent", "SERVICES", "Customer"),
            Check::relationship_exists("Policy", "BASED_ON", "Product"),
            Check::min_relationships("HOLDS_POLICY", 3),
            Check::min_relationships("BASED_ON", 3),
            Check::query(
                "customer properties",
                QuerySpec::new(
                    "MATCH (c:Customer {customer_number: 'CUST-001234'})
                     RETURN c.first_name AS first_name,
                            c.last_name AS last_name,
                            c.email AS email,
                            c.credit_score AS credit_score,
                            c.risk_tier AS risk_tier",
                )
                .exactly(1)
                .expect(Expect::Eq("first_name", json!("Sarah")))
                .expect(Expect::Eq("last_name", json!("Johnson")))
                .expect(Expect::NotNull("email"))
                .expect(Expect::Eq("credit_score", json!(720)))
                .expect(Expect::Eq("risk_tier", json!("Standard"))),
            ),
            Check::query(
                "policy properties",
                QuerySpec::new(
                    "MATCH (p:Policy {policy_number: 'POL-AUTO-001234'})
                     RETURN p.product_type AS product_type,
                            p.policy_status AS status,
                            p.annual_premium AS premium",
                )
                .exactly(1)
                .expect(Expect::Eq("product_type", json!("Auto")))
                .expect(Expect::Eq("status", json!("Active")))
                .expect(Expect::Gt("premium", 0.0)),
            ),
            Check::query(
                "active policies labeled",
                QuerySpec::count_at_least(
                    "MATCH (p:Policy:Active) RETURN count(p) AS cnt",
                    "cnt",
                    3,
                ),
            ),
            Check::query(
                "auto policies by property",
                QuerySpec::count_at_least(
                    "MATCH (p:Policy) WHERE p.product_type = 'Auto' RETURN count(p) AS cnt",
                    "cnt",
                    2,
                ),
            ),
            Check::query(
                "active auto policies carry vehicle details",
                QuerySpec::new(
                    "MATCH (p:Policy:Active)
                     WHERE p.product_type = 'Auto'
                     RETURN p.policy_number AS policy_number,
                            p.annual_premium AS annual_premium,
                            p.auto_make AS auto_make,
                            p.auto_model AS auto_model",
                )
                .at_least(2)
                .expect(Expect::NotNull("policy_number"))
                .expect(Expect::NotNull("annual_premium"))
                .expect(Expect::NotNull("auto_make"))
                .expect(Expect::NotNull("auto_model")),
            ),
            Check::summary(CORE_LABELS.to_vec()),
        ],
    )
}

fn lab02() -> LabSuite {
    LabSuite::new(
        2,
        "Cypher Query Fundamentals",
        "25 nodes, 40 relationships",
        vec![
            Check::total_nodes(25),
            Check::total_relationships(40),
            Check::min_nodes("Branch", 3),
            Check::min_nodes("Department", 3),
            Check::node_exists("Branch", "branch_id", "BR-001"),
            Check::node_exists("Branch", "branch_id", "BR-002"),
            Check::node_exists("Branch", "branch_id", "BR-003"),
            Check::node_exists("Department", "department_code", "SALES"),
            Check::node_exists("Department", "department_code", "CLAIMS"),
            Check::node_exists("Department", "department_code", "UW"),
            Check::relationship_exists("Agent", "WORKS_AT", "Branch"),
            Check::relationship_exists("Agent", "MEMBER_OF", "Department"),
            Check::query(
                "match-where-return",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE c.risk_tier = 'Standard'
                     RETURN c.customer_number AS customer_number",
                )
                .at_least(1),
            ),
            Check::query(
                "match-where-return over relationships",
                QuerySpec::new(
                    "MATCH (a:Agent)-[:WORKS_AT]->(b:Branch)
                     WHERE b.city = 'Austin'
                     RETURN a.agent_id AS agent_id, b.branch_name AS branch",
                )
                .at_least(1),
            ),
            Check::query(
                "branch properties",
                QuerySpec::new(
                    "MATCH (b:Branch {branch_id: 'BR-001'})
                     RETURN b.branch_name AS name,
                            b.city AS city,
                            b.employee_count AS employees,
                            b.customer_count AS customers",
                )
                .exactly(1)
                .expect(Expect::Eq("name", json!("Austin Downtown")))
                .expect(Expect::Eq("city", json!("Austin")))
                .expect(Expect::NotNull("employees"))
                .expect(Expect::NotNull("customers")),
            ),
            Check::query(
                "department properties",
                QuerySpec::new(
                    "MATCH (d:Department {department_code: 'SALES'})
                     RETURN d.department_name AS name,
                            d.budget AS budget,
                            d.head_count AS headcount",
                )
                .exactly(1)
                .expect(Expect::Eq("name", json!("Sales")))
                .expect(Expect::Gt("budget", 0.0))
                .expect(Expect::Gt("headcount", 0.0)),
            ),
            Check::query(
                "agents connected to branches",
                QuerySpec::count_at_least(
                    "MATCH (a:Agent)-[:WORKS_AT]->(b:Branch) RETURN count(a) AS agent_count",
                    "agent_count",
                    2,
                ),
            ),
            Check::query(
                "string concatenation",
                QuerySpec::new(
                    "MATCH (a:Agent)
                     WHERE a.first_name IS NOT NULL AND a.last_name IS NOT NULL
                     RETURN a.first_name + ' ' + a.last_name AS full_name
                     LIMIT 3",
                )
                .at_least(3)
                .expect(Expect::ContainsText("full_name", " ")),
            ),
            Check::query(
                "multiple where conditions",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE c.risk_tier = 'Standard'
                       AND c.customer_number IS NOT NULL
                     RETURN c.customer_number AS customer_number
                     LIMIT 5",
                )
                .at_least(1),
            ),
            Check::query(
                "relationship traversal",
                QuerySpec::new(
                    "MATCH (a:Agent)-[r:WORKS_AT]->(b:Branch)
                     RETURN a.agent_id AS agent_id, b.branch_name AS branch_name
                     LIMIT 3",
                )
                .at_least(1),
            ),
            Check::query(
                "order by",
                QuerySpec::new(
                    "MATCH (b:Branch)
                     RETURN b.branch_name AS branch_name
                     ORDER BY b.branch_name",
                )
                .at_least(3),
            ),
            Check::query(
                "collect into lists",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     WITH c, collect(p.policy_number) AS policies
                     RETURN c.customer_number AS customer_number, size(policies) AS policy_count
                     LIMIT 3",
                )
                .at_least(1),
            ),
            Check::query(
                "date properties",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE c.date_of_birth IS NOT NULL
                     RETURN c.customer_number AS customer_number,
                            toString(c.date_of_birth) AS date_of_birth
                     ORDER BY c.date_of_birth
                     LIMIT 3",
                )
                .at_least(1)
                .expect(Expect::NotNull("date_of_birth")),
            ),
            Check::query(
                "department membership",
                QuerySpec::new(
                    "MATCH (a:Agent)-[:MEMBER_OF]->(d:Department)
                     RETURN a.agent_id AS agent_id, d.department_code AS department_code
                     LIMIT 3",
                )
                .at_least(1),
            ),
            Check::query(
                "count aggregation",
                QuerySpec::new(
                    "MATCH (a:Agent)-[:WORKS_AT]->(b:Branch)
                     RETURN b.branch_name AS branch_name, count(a) AS agent_count
                     ORDER BY agent_count DESC",
                )
                .at_least(1)
                .expect(Expect::SumGt("agent_count", 1.0)),
            ),
            Check::query(
                "aliases in return",
                QuerySpec::new(
                    "MATCH (d:Department)
                     RETURN d.department_name AS dept_name,
                            d.head_count AS employees,
                            d.budget / d.head_count AS budget_per_employee
                     LIMIT 3",
                )
                .at_least(3)
                .expect(Expect::NotNull("dept_name"))
                .expect(Expect::Gt("budget_per_employee", 0.0)),
            ),
            Check::query(
                "property filter in match",
                QuerySpec::new(
                    "MATCH (b:Branch {city: 'Austin'})
                     RETURN b.branch_name AS branch_name",
                )
                .at_least(1),
            ),
            Check::query(
                "limit",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     RETURN c.customer_number AS customer_number
                     LIMIT 5",
                )
                .exactly(5),
            ),
            Check::query(
                "distinct values",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     RETURN DISTINCT c.risk_tier AS risk_tier",
                )
                .at_least(2)
                .expect(Expect::Distinct("risk_tier")),
            ),
            Check::summary(vec!["Branch", "Department"]),
        ],
    )
}

fn lab03() -> LabSuite {
    LabSuite::new(
        3,
        "Claims Processing & Financial Transaction Modeling",
        "60 nodes, 85 relationships",
        vec![
            Check::total_nodes(60),
            Check::total_relationships(85),
            Check::min_nodes("Vehicle", 2),
            Check::min_nodes("Property", 1),
            Check::min_nodes("Claim", 3),
            Check::min_nodes("RepairShop", 3),
            Check::min_nodes("Payment", 3),
            Check::min_nodes("Invoice", 2),
            Check::min_relationships("COVERS", 3),
            Check::min_relationships("FILED_CLAIM", 3),
            Check::min_relationships("INVOLVES_ASSET", 3),
            Check::min_relationships("ASSIGNED_TO", 3),
            Check::min_relationships("MADE_PAYMENT", 3),
            Check::min_relationships("APPLIED_TO", 3),
            Check::node_exists("Claim", "claim_number", "CLM-AUTO-001234"),
            Check::query(
                "claim properties",
                QuerySpec::new(
                    "MATCH (cl:Claim {claim_number: 'CLM-AUTO-001234'})
                     RETURN cl.claim_type AS type,
                            cl.claim_status AS status,
                            cl.claim_amount AS amount,
                            cl.fault_determination AS fault",
                )
                .exactly(1)
                .expect(Expect::Eq("type", json!("Auto")))
                .expect(Expect::NotNull("status"))
                .expect(Expect::Gt("amount", 0.0))
                .expect(Expect::NotNull("fault")),
            ),
            Check::query(
                "vehicle properties",
                QuerySpec::new(
                    "MATCH (v:Vehicle {vin: '1HGBH41JXMN109186'})
                     RETURN v.make AS make,
                            v.model AS model,
                            v.year AS year,
                            v.market_value AS value",
                )
                .exactly(1)
                .expect(Expect::Eq("make", json!("Toyota")))
                .expect(Expect::Eq("model", json!("Camry")))
                .expect(Expect::Eq("year", json!(2022)))
                .expect(Expect::Gt("value", 0.0)),
            ),
            Check::query(
                "claims workflow",
                QuerySpec::count_at_least(
                    "MATCH (customer:Customer)-[:FILED_CLAIM]->(claim:Claim)
                     MATCH (claim)-[:INVOLVES_ASSET]->(asset)
                     MATCH (claim)-[:ASSIGNED_TO]->(vendor:RepairShop)
                     RETURN count(*) AS complete_workflows",
                    "complete_workflows",
                    3,
                ),
            ),
            Check::query(
                "payment workflow",
                QuerySpec::count_at_least(
                    "MATCH (customer:Customer)-[:MADE_PAYMENT]->(payment:Payment)
                     MATCH (payment)-[:APPLIED_TO]->(policy:Policy)
                     RETURN count(*) AS payment_flows",
                    "payment_flows",
                    3,
                ),
            ),
            Check::query(
                "claims by status",
                QuerySpec::new(
                    "MATCH (c:Claim)
                     RETURN c.claim_status AS status,
                            count(c) AS claim_count,
                            avg(c.claim_amount) AS avg_claim_amount,
                            sum(c.claim_amount) AS total_claim_amount
                     ORDER BY claim_count DESC",
                )
                .at_least(1)
                .expect(Expect::Gt("claim_count", 0.0))
                .expect(Expect::Gt("avg_claim_amount", 0.0))
                .expect(Expect::Gt("total_claim_amount", 0.0)),
            ),
            Check::query(
                "multi-hop claims",
                QuerySpec::new(
                    "MATCH (customer:Customer)-[:FILED_CLAIM]->(claim:Claim)
                     MATCH (claim)-[:INVOLVES_ASSET]->(asset)
                     RETURN customer.first_name + ' ' + customer.last_name AS customer_name,
                            claim.claim_number AS claim_number,
                            claim.claim_type AS claim_type,
                            labels(asset)[0] AS asset_type,
                            claim.claim_amount AS claim_amount,
                            claim.claim_status AS status
                     ORDER BY claim.claim_amount DESC",
                )
                .at_least(3)
                .expect(Expect::ContainsText("customer_name", " "))
                .expect(Expect::OneOf(
                    "asset_type",
                    vec![json!("Vehicle"), json!("Property"), json!("Asset")],
                ))
                .expect(Expect::Gt("claim_amount", 0.0)),
            ),
            Check::query(
                "premium payments by method",
                QuerySpec::new(
                    "MATCH (p:Payment)
                     WHERE p.payment_type = 'Premium'
                     RETURN count(p) AS total_payments,
                            sum(p.amount) AS total_premiums_collected,
                            avg(p.amount) AS average_payment,
                            p.payment_method AS payment_method
                     ORDER BY total_premiums_collected DESC",
                )
                .at_least(1)
                .expect(Expect::SumGt("total_premiums_collected", 0.0)),
            ),
            Check::query(
                "vendor performance",
                QuerySpec::new(
                    "MATCH (vendor:RepairShop)<-[:ASSIGNED_TO]-(claim:Claim)
                     RETURN vendor.business_name AS vendor,
                            vendor.specialization AS services,
                            count(claim) AS claims_assigned,
                            avg(claim.claim_amount) AS avg_claim_value,
                            vendor.rating AS vendor_rating,
                            vendor.average_repair_time AS avg_repair_days
                     ORDER BY claims_assigned DESC",
                )
                .at_least(3)
                .expect(Expect::Gt("claims_assigned", 0.0))
                .expect(Expect::Gt("avg_claim_value", 0.0))
                .expect(Expect::Gt("vendor_rating", 0.0)),
            ),
            Check::query(
                "relationship property filter",
                QuerySpec::new(
                    "MATCH (claim:Claim)-[r:INVOLVES_ASSET]->(asset)
                     WHERE r.damage_severity IS NOT NULL
                     RETURN claim.claim_number AS claim_number,
                            r.damage_type AS damage_type,
                            r.damage_severity AS severity,
                            r.estimated_repair_cost AS repair_cost
                     ORDER BY r.estimated_repair_cost DESC",
                )
                .at_least(3)
                .expect(Expect::OneOf(
                    "severity",
                    vec![
                        json!("Minor"),
                        json!("Moderate"),
                        json!("Major"),
                        json!("Severe"),
                    ],
                ))
                .expect(Expect::Gt("repair_cost", 0.0)),
            ),
            Check::query(
                "date range filter",
                QuerySpec::new(
                    "MATCH (c:Claim)
                     WHERE c.incident_date >= date('2024-06-01')
                       AND c.incident_date <= date('2024-07-31')
                     RETURN c.claim_number AS claim_number,
                            toString(c.incident_date) AS incident_date,
                            toString(c.report_date) AS report_date,
                            duration.between(c.incident_date, c.report_date).days AS days_to_report
                     ORDER BY c.incident_date",
                )
                .at_least(1)
                .expect(Expect::Between(
                    "incident_date",
                    json!("2024-06-01"),
                    json!("2024-07-31"),
                ))
                .expect(Expect::Ge("days_to_report", 0.0)),
            ),
            Check::query(
                "coverage details",
                QuerySpec::new(
                    "MATCH (policy:Policy)-[r:COVERS]->(asset)
                     RETURN policy.policy_number AS policy_number,
                            labels(asset)[0] AS asset_type,
                            r.coverage_types AS coverage_types,
                            toString(r.coverage_start) AS coverage_start",
                )
                .at_least(3)
                .expect(Expect::NonEmptyList("coverage_types"))
                .expect(Expect::NotNull("coverage_start")),
            ),
            Check::query(
                "optional match settlements",
                QuerySpec::new(
                    "MATCH (claim:Claim)
                     OPTIONAL MATCH (settlement:Payment)-[:SETTLES_CLAIM]->(claim)
                     RETURN claim.claim_number AS claim_number,
                            claim.claim_amount AS claim_amount,
                            claim.claim_status AS status,
                            COALESCE(settlement.amount, 0.0) AS settlement_amount,
                            CASE WHEN settlement IS NULL THEN 'Not Settled' ELSE 'Settled' END AS settlement_status
                     ORDER BY claim.claim_amount DESC",
                )
                .at_least(3)
                .expect(Expect::OneOf(
                    "settlement_status",
                    vec![json!("Settled"), json!("Not Settled")],
                ))
                .expect(Expect::Ge("settlement_amount", 0.0)),
            ),
            Check::query(
                "payment application",
                QuerySpec::new(
                    "MATCH (customer:Customer)-[:MADE_PAYMENT]->(payment:Payment)
                     MATCH (payment)-[r:APPLIED_TO]->(policy:Policy)
                     RETURN customer.customer_number AS customer,
                            payment.payment_id AS payment_id,
                            payment.amount AS amount,
                            r.amount_applied AS amount_applied,
                            r.remaining_balance AS remaining_balance,
                            policy.policy_number AS policy",
                )
                .at_least(3)
                .expect(Expect::Gt("amount", 0.0))
                .expect(Expect::Gt("amount_applied", 0.0))
                .expect(Expect::Ge("remaining_balance", 0.0)),
            ),
            Check::query(
                "fraud risk levels",
                QuerySpec::new(
                    "MATCH (c:Claim)
                     WHERE c.fraud_score IS NOT NULL
                     WITH c,
                          CASE
                            WHEN c.fraud_score > 0.7 THEN 'High Risk'
                            WHEN c.fraud_score > 0.3 THEN 'Medium Risk'
                            ELSE 'Low Risk'
                          END AS fraud_risk_level
                     RETURN fraud_risk_level,
                            count(c) AS claim_count,
                            avg(c.fraud_score) AS avg_fraud_score,
                            sum(c.claim_amount) AS total_exposure
                     ORDER BY avg_fraud_score DESC",
                )
                .at_least(1)
                .expect(Expect::OneOf(
                    "fraud_risk_level",
                    vec![json!("High Risk"), json!("Medium Risk"), json!("Low Risk")],
                ))
                .expect(Expect::Gt("claim_count", 0.0)),
            ),
            Check::query(
                "complete workflow",
                QuerySpec::new(
                    "MATCH (customer:Customer)-[:FILED_CLAIM]->(claim:Claim)
                     MATCH (claim)-[:INVOLVES_ASSET]->(asset)
                     MATCH (claim)-[:ASSIGNED_TO]->(vendor:RepairShop)
                     RETURN customer.customer_number AS customer,
                            claim.claim_number AS claim,
                            labels(asset)[0] AS asset_type,
                            vendor.business_name AS vendor,
                            claim.claim_amount AS amount,
                            vendor.average_repair_time AS estimated_days",
                )
                .at_least(3)
                .expect(Expect::NotNull("customer"))
                .expect(Expect::NotNull("claim"))
                .expect(Expect::NotNull("vendor"))
                .expect(Expect::Gt("amount", 0.0)),
            ),
            Check::query(
                "financial reconciliation",
                QuerySpec::new(
                    "MATCH (customer:Customer)
                     OPTIONAL MATCH (customer)-[:MADE_PAYMENT]->(payment:Payment)
                     WHERE payment.payment_type = 'Premium'
                     OPTIONAL MATCH (customer)-[:FILED_CLAIM]->(claim:Claim)
                     WITH customer,
                          COALESCE(sum(payment.amount), 0.0) AS total_paid,
                          COALESCE(sum(claim.claim_amount), 0.0) AS total_claimed,
                          count(DISTINCT payment) AS payment_count,
                          count(DISTINCT claim) AS claim_count
                     WHERE payment_count > 0 OR claim_count > 0
                     RETURN customer.customer_number AS customer,
                            total_paid,
                            total_claimed,
                            CASE WHEN total_paid > 0 THEN total_claimed / total_paid ELSE 0.0 END AS claims_ratio,
                            payment_count,
                            claim_count
                     ORDER BY claims_ratio DESC
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::Ge("total_paid", 0.0))
                .expect(Expect::Ge("total_claimed", 0.0))
                .expect(Expect::Ge("claims_ratio", 0.0)),
            ),
            Check::query(
                "asset valuation",
                QuerySpec::new(
                    "MATCH (asset)
                     WHERE asset:Vehicle OR asset:Property
                     OPTIONAL MATCH (policy:Policy)-[r:COVERS]->(asset)
                     WITH labels(asset)[0] AS asset_type,
                          count(asset) AS asset_count,
                          avg(asset.market_value) AS avg_value,
                          sum(asset.market_value) AS total_value,
                          count(policy) AS policies_count
                     RETURN asset_type,
                            asset_count,
                            round(avg_value * 100) / 100 AS avg_value,
                            round(total_value * 100) / 100 AS total_value,
                            policies_count
                     ORDER BY total_value DESC",
                )
                .at_least(2)
                .expect(Expect::OneOf(
                    "asset_type",
                    vec![json!("Vehicle"), json!("Property"), json!("Asset")],
                ))
                .expect(Expect::Gt("asset_count", 0.0))
                .expect(Expect::Gt("avg_value", 0.0)),
            ),
            Check::summary(vec!["Claim", "Vehicle", "Property", "Payment"]),
        ],
    )
}

const BULK_CUSTOMERS: &[&str] = &["CUST-001237", "CUST-001238", "CUST-001239", "CUST-001240"];

fn lab04() -> LabSuite {
    LabSuite::new(
        4,
        "Bulk Data Import & Quality Control",
        "150 nodes, 200 relationships",
        vec![
            Check::total_nodes(150),
            Check::total_relationships(200),
            Check::min_nodes("Customer", 13),
            Check::min_nodes("Policy", 13),
            Check::min_nodes("Agent", 6),
            Check::min_nodes("Vehicle", 12),
            Check::min_constraints(None, 5),
            Check::min_constraints(Some("customer"), 1),
            Check::min_constraints(Some("policy"), 1),
            Check::min_constraints(Some("vin"), 1),
            Check::query(
                "performance indexes",
                QuerySpec::new(
                    "SHOW INDEXES YIELD name
                     WHERE name CONTAINS 'customer' OR name CONTAINS 'policy' OR name CONTAINS 'claim'
                     RETURN name",
                )
                .at_least(3),
            ),
            Check::query(
                "bulk imported customers",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE c.customer_number IN $customer_numbers
                     RETURN count(c) AS cnt",
                )
                .param("customer_numbers", BULK_CUSTOMERS)
                .exactly(1)
                .expect(Expect::Eq("cnt", json!(BULK_CUSTOMERS.len()))),
            ),
            Check::query(
                "territory assignment",
                QuerySpec::new(
                    "MATCH (agent:Agent)-[:SERVICES]->(customer:Customer)
                     RETURN agent.territory AS territory, count(customer) AS customer_count
                     ORDER BY customer_count DESC",
                )
                .at_least(4),
            ),
            Check::query(
                "agent workload",
                QuerySpec::new(
                    "MATCH (agent:Agent)-[:SERVICES]->(customer:Customer)
                     RETURN agent.agent_id AS agent_id, count(customer) AS customer_count
                     ORDER BY customer_count DESC",
                )
                .at_least(4)
                .expect(Expect::Le("customer_count", 10.0)),
            ),
            // Later labs add policies without holders, so this only reports.
            Check::informational(
                "policies without holders",
                "MATCH (p:Policy)
                 WHERE NOT EXISTS { MATCH (p)<-[:HOLDS_POLICY]-(:Customer) }
                 RETURN count(p) AS orphaned_policies",
            ),
            Check::query(
                "credit scores in range",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE c.credit_score < 300 OR c.credit_score > 850
                     RETURN count(c) AS invalid_scores",
                )
                .exactly(1)
                .expect(Expect::Eq("invalid_scores", json!(0))),
            ),
            Check::query(
                "geographic distribution",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     RETURN c.city AS city, count(c) AS cnt
                     ORDER BY cnt DESC",
                )
                .at_least(3),
            ),
            Check::query(
                "unwind",
                QuerySpec::new(
                    "WITH [
                       {name: 'Test1', value: 100},
                       {name: 'Test2', value: 200},
                       {name: 'Test3', value: 300}
                     ] AS testData
                     UNWIND testData AS row
                     RETURN row.name AS name, row.value AS value",
                )
                .exactly(3)
                .expect(Expect::ColumnSequence(
                    "value",
                    vec![json!(100), json!(200), json!(300)],
                )),
            ),
            Check::new("merge on create and on match", CheckKind::MergeUpsert),
            Check::query(
                "string functions",
                QuerySpec::new(
                    "WITH 'John' AS firstName, 'Doe' AS lastName
                     RETURN toLower(firstName) AS lower_first,
                            toUpper(lastName) AS upper_last,
                            toLower(firstName) + '.' + toLower(lastName) + '@test.com' AS email",
                )
                .exactly(1)
                .expect(Expect::Eq("lower_first", json!("john")))
                .expect(Expect::Eq("upper_last", json!("DOE")))
                .expect(Expect::Eq("email", json!("john.doe@test.com"))),
            ),
            Check::query(
                "type conversions",
                QuerySpec::new(
                    "WITH 123 AS numValue, '456' AS strValue
                     RETURN toString(numValue) AS num_to_str,
                            toInteger(strValue) AS str_to_int,
                            toFloat('78.9') AS str_to_float,
                            toInteger(78.9) AS float_to_int",
                )
                .exactly(1)
                .expect(Expect::Eq("num_to_str", json!("123")))
                .expect(Expect::Eq("str_to_int", json!(456)))
                .expect(Expect::Eq("str_to_float", json!(78.9)))
                .expect(Expect::Eq("float_to_int", json!(78))),
            ),
            Check::query(
                "case expressions",
                QuerySpec::new(
                    "WITH [1, 2, 3, 4] AS values
                     UNWIND values AS val
                     RETURN val,
                            CASE val
                              WHEN 1 THEN 'One'
                              WHEN 2 THEN 'Two'
                              WHEN 3 THEN 'Three'
                              ELSE 'Other'
                            END AS name,
                            CASE
                              WHEN val % 2 = 0 THEN 'Even'
                              ELSE 'Odd'
                            END AS parity",
                )
                .exactly(4)
                .expect(Expect::ColumnSequence(
                    "name",
                    vec![json!("One"), json!("Two"), json!("Three"), json!("Other")],
                ))
                .expect(Expect::ColumnSequence(
                    "parity",
                    vec![json!("Odd"), json!("Even"), json!("Odd"), json!("Even")],
                )),
            ),
            Check::query(
                "date arithmetic",
                QuerySpec::new(
                    "WITH date('2024-01-01') AS start_date
                     RETURN toString(start_date) AS start_date,
                            toString(start_date + duration({days: 30})) AS plus_30_days,
                            toString(start_date + duration({months: 6})) AS plus_6_months,
                            toString(start_date + duration({years: 1})) AS plus_1_year,
                            duration.between(start_date, date('2024-12-31')).days AS days_diff",
                )
                .exactly(1)
                .expect(Expect::Eq("plus_30_days", json!("2024-01-31")))
                .expect(Expect::NotNull("plus_6_months"))
                .expect(Expect::Gt("days_diff", 0.0)),
            ),
            Check::query(
                "not exists filter",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE NOT EXISTS { MATCH (c)<-[:SERVICES]-(:Agent) }
                     RETURN count(c) AS unassigned_customers",
                )
                .exactly(1)
                .expect(Expect::Ge("unassigned_customers", 0.0)),
            ),
            Check::query(
                "conditional agent suggestion",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WITH c, c.city AS city
                     RETURN city,
                            CASE city
                              WHEN 'Houston' THEN 'AGT-003'
                              WHEN 'Dallas' THEN 'AGT-004'
                              WHEN 'San Antonio' THEN 'AGT-005'
                              ELSE 'AGT-001'
                            END AS suggested_agent
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::NotNull("suggested_agent")),
            ),
            Check::query(
                "bulk property calculations",
                QuerySpec::new(
                    "MATCH (a:Agent)
                     WHERE a.customer_count IS NOT NULL
                     WITH a, a.customer_count AS current_count
                     RETURN a.agent_id AS agent,
                            current_count,
                            current_count * 12000 AS estimated_annual_value
                     ORDER BY estimated_annual_value DESC
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::Ge("estimated_annual_value", 0.0)),
            ),
            Check::query(
                "credit score validation",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE c.credit_score IS NOT NULL
                     WITH c, c.credit_score AS score
                     WHERE score < 300 OR score > 850
                     RETURN count(c) AS invalid_scores",
                )
                .exactly(1)
                .expect(Expect::Eq("invalid_scores", json!(0))),
            ),
            Check::query(
                "missing field validation",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE c.email IS NULL OR c.risk_tier IS NULL
                     RETURN count(c) AS missing_fields",
                )
                .exactly(1)
                .expect(Expect::Ge("missing_fields", 0.0)),
            ),
            Check::query(
                "referential integrity",
                QuerySpec::new(
                    "MATCH (p:Policy)
                     WHERE NOT EXISTS { MATCH (p)<-[:HOLDS_POLICY]-(:Customer) }
                     RETURN count(p) AS orphaned_policies",
                )
                .exactly(1)
                .expect(Expect::Eq("orphaned_policies", json!(0))),
            ),
            Check::query(
                "territory aggregation",
                QuerySpec::new(
                    "MATCH (a:Agent)-[:SERVICES]->(c:Customer)
                     WHERE a.territory IS NOT NULL
                     RETURN a.territory AS territory,
                            count(DISTINCT c) AS customers,
                            count(DISTINCT a) AS agents,
                            CASE
                              WHEN count(DISTINCT a) > 0 THEN count(DISTINCT c) / toFloat(count(DISTINCT a))
                              ELSE 0.0
                            END AS customers_per_agent
                     ORDER BY customers DESC",
                )
                .at_least(1)
                .expect(Expect::Gt("customers", 0.0))
                .expect(Expect::Ge("customers_per_agent", 0.0)),
            ),
            Check::query(
                "bulk data statistics",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     RETURN count(c) AS total_customers,
                            avg(c.credit_score) AS avg_credit_score,
                            min(c.credit_score) AS min_credit_score,
                            max(c.credit_score) AS max_credit_score,
                            count(DISTINCT c.city) AS cities_served",
                )
                .exactly(1)
                .expect(Expect::Ge("total_customers", 13.0))
                .expect(Expect::Ge("avg_credit_score", 300.0))
                .expect(Expect::Le("avg_credit_score", 850.0)),
            ),
            Check::query(
                "bulk policy vehicle links",
                QuerySpec::new(
                    "MATCH (p:Policy:Auto)-[:COVERS]->(v:Vehicle)
                     WHERE p.policy_number STARTS WITH 'POL-AUTO-00124'
                     RETURN p.policy_number AS policy,
                            v.vin AS vin,
                            v.make + ' ' + v.model AS vehicle,
                            v.market_value AS value
                     ORDER BY v.market_value DESC",
                )
                .at_least(7)
                .expect(Expect::NotNull("vin"))
                .expect(Expect::Gt("value", 0.0)),
            ),
            Check::summary(vec!["Customer", "Policy", "Agent", "Vehicle"]),
        ],
    )
}

fn lab05() -> LabSuite {
    LabSuite::new(
        5,
        "Advanced Analytics Foundation",
        "200 nodes, 300 relationships",
        vec![
            Check::total_nodes(200),
            Check::total_relationships(250),
            Check::min_nodes("RiskAssessment", 10),
            Check::min_nodes("CustomerProfile", 10),
            Check::min_nodes("CrossSellOpportunity", 10),
            Check::min_nodes("PredictiveModel", 10),
            Check::min_nodes("BusinessKPI", 1),
            Check::min_relationships("HAS_RISK_ASSESSMENT", 10),
            Check::min_relationships("HAS_PROFILE", 10),
            Check::min_relationships("HAS_PREDICTION", 10),
            Check::min_relationships("HAS_OPPORTUNITY", 10),
            Check::query(
                "scored risk assessments",
                QuerySpec::count_at_least(
                    "MATCH (r:RiskAssessment)
                     WHERE r.risk_score IS NOT NULL
                     RETURN count(r) AS complete_assessments",
                    "complete_assessments",
                    10,
                ),
            ),
            Check::query(
                "complete customer profiles",
                QuerySpec::count_at_least(
                    "MATCH (cp:CustomerProfile)
                     WHERE cp.profitability_score IS NOT NULL
                       AND cp.lifetime_value IS NOT NULL
                     RETURN count(cp) AS complete_profiles",
                    "complete_profiles",
                    10,
                ),
            ),
            Check::query(
                "complete predictions",
                QuerySpec::count_at_least(
                    "MATCH (pm:PredictiveModel)
                     WHERE pm.churn_probability IS NOT NULL
                       AND pm.cross_sell_probability IS NOT NULL
                     RETURN count(pm) AS complete_predictions",
                    "complete_predictions",
                    10,
                ),
            ),
            Check::query(
                "customer 360 view",
                QuerySpec::count_at_least(
                    "MATCH (c:Customer)
                     MATCH (c)-[:HAS_PROFILE]->(profile:CustomerProfile)
                     MATCH (c)-[:HAS_RISK_ASSESSMENT]->(risk:RiskAssessment)
                     MATCH (c)-[:HAS_PREDICTION]->(prediction:PredictiveModel)
                     RETURN count(c) AS customers_with_360_view",
                    "customers_with_360_view",
                    10,
                ),
            ),
            Check::query(
                "customer segments",
                QuerySpec::new(
                    "MATCH (cp:CustomerProfile)
                     RETURN cp.customer_segment AS segment, count(*) AS cnt
                     ORDER BY cnt DESC",
                )
                .at_least(2),
            ),
            Check::query(
                "cross-sell opportunities",
                QuerySpec::count_at_least(
                    "MATCH (cso:CrossSellOpportunity)
                     RETURN count(cso) AS opportunities",
                    "opportunities",
                    10,
                ),
            ),
            Check::query(
                "business kpis",
                QuerySpec::new(
                    "MATCH (kpi:BusinessKPI)
                     RETURN kpi.total_customers AS customers,
                            kpi.total_active_policies AS policies,
                            kpi.total_premium_portfolio AS premium,
                            kpi.loss_ratio AS loss_ratio",
                )
                .at_least(1)
                .expect(Expect::Gt("customers", 0.0))
                .expect(Expect::Gt("policies", 0.0))
                .expect(Expect::Gt("premium", 0.0))
                .expect(Expect::NotNull("loss_ratio")),
            ),
            Check::query(
                "risk and profitability correlation",
                QuerySpec::count_at_least(
                    "MATCH (c:Customer)-[:HAS_PROFILE]->(profile:CustomerProfile)
                     MATCH (c)-[:HAS_RISK_ASSESSMENT]->(risk:RiskAssessment)
                     WHERE profile.profitability_score IS NOT NULL
                       AND risk.risk_score IS NOT NULL
                     RETURN count(*) AS customers_with_correlation",
                    "customers_with_correlation",
                    10,
                ),
            ),
            Check::query(
                "risk scores",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HAS_RISK_ASSESSMENT]->(r:RiskAssessment)
                     WHERE c.risk_tier IS NOT NULL AND c.credit_score IS NOT NULL
                     RETURN c.customer_number AS customer,
                            c.risk_tier AS tier,
                            c.credit_score AS credit,
                            r.risk_score AS calculated_score
                     LIMIT 5",
                )
                .at_least(5)
                .expect(Expect::Gt("calculated_score", 0.0)),
            ),
            Check::query(
                "territory risk",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HAS_RISK_ASSESSMENT]->(r:RiskAssessment)
                     WITH c.city AS territory,
                          count(c) AS customer_count,
                          avg(r.risk_score) AS avg_risk_score,
                          avg(c.credit_score) AS avg_credit_score
                     WHERE customer_count > 0
                     RETURN territory,
                            customer_count,
                            round(avg_risk_score * 100) / 100 AS avg_risk,
                            round(avg_credit_score * 100) / 100 AS avg_credit
                     ORDER BY avg_risk DESC",
                )
                .at_least(1)
                .expect(Expect::Gt("customer_count", 0.0))
                .expect(Expect::NotNull("avg_risk"))
                .expect(Expect::NotNull("avg_credit")),
            ),
            Check::query(
                "policy risk correlation",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     MATCH (c)-[:HAS_RISK_ASSESSMENT]->(r:RiskAssessment)
                     WITH p.product_type AS product_type,
                          c.risk_tier AS risk_tier,
                          avg(r.risk_score) AS avg_risk_score,
                          avg(p.annual_premium) AS avg_premium,
                          count(p) AS policy_count
                     WHERE policy_count > 0
                     RETURN product_type,
                            risk_tier,
                            policy_count,
                            round(avg_risk_score * 100) / 100 AS avg_risk,
                            round(avg_premium * 100) / 100 AS avg_premium
                     ORDER BY product_type, avg_risk DESC
                     LIMIT 10",
                )
                .at_least(1)
                .expect(Expect::Gt("policy_count", 0.0))
                .expect(Expect::NotNull("avg_risk"))
                .expect(Expect::Gt("avg_premium", 0.0)),
            ),
            Check::query(
                "optional match",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     OPTIONAL MATCH (c)-[:HOLDS_POLICY]->(p:Policy)
                     OPTIONAL MATCH (c)-[:FILED_CLAIM]->(claim:Claim)
                     OPTIONAL MATCH (c)-[:MADE_PAYMENT]->(payment:Payment)
                     RETURN c.customer_number AS customer,
                            count(DISTINCT p) AS policy_count,
                            count(DISTINCT claim) AS claim_count,
                            count(DISTINCT payment) AS payment_count
                     LIMIT 5",
                )
                .at_least(5)
                .expect(Expect::NotNull("customer"))
                .expect(Expect::Ge("policy_count", 0.0)),
            ),
            Check::query(
                "age and tenure",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     WHERE c.date_of_birth IS NOT NULL AND c.customer_since IS NOT NULL
                     WITH c,
                          duration.between(c.date_of_birth, date()).years AS age,
                          duration.between(c.customer_since, date()).years AS tenure_years
                     WHERE age > 0 AND tenure_years >= 0
                     RETURN c.customer_number AS customer, age, tenure_years
                     LIMIT 5",
                )
                .at_least(5)
                .expect(Expect::Between("age", json!(1), json!(119)))
                .expect(Expect::Ge("tenure_years", 0.0)),
            ),
            Check::query(
                "case segmentation",
                QuerySpec::new(
                    "MATCH (cp:CustomerProfile)
                     WHERE cp.lifetime_value IS NOT NULL
                     WITH cp,
                          CASE
                            WHEN cp.lifetime_value > 15000 THEN 'Premium'
                            WHEN cp.lifetime_value > 10000 THEN 'High-Value'
                            WHEN cp.lifetime_value > 5000 THEN 'Standard'
                            ELSE 'Basic'
                          END AS value_segment
                     RETURN value_segment, count(*) AS cnt
                     ORDER BY cnt DESC",
                )
                .at_least(2)
                .expect(Expect::Distinct("value_segment")),
            ),
            Check::query(
                "ratio calculations",
                QuerySpec::new(
                    "MATCH (cp:CustomerProfile)
                     WHERE cp.total_annual_premium IS NOT NULL
                       AND cp.total_claim_amount IS NOT NULL
                       AND cp.total_annual_premium > 0
                     WITH cp,
                          cp.total_claim_amount / cp.total_annual_premium AS claims_ratio,
                          CASE WHEN cp.policy_count > 0
                               THEN cp.total_annual_premium / cp.policy_count
                               ELSE 0.0
                          END AS avg_policy_premium
                     WHERE claims_ratio >= 0
                     RETURN cp.customer_id AS customer,
                            round(claims_ratio * 100) / 100 AS claims_ratio,
                            round(avg_policy_premium * 100) / 100 AS avg_premium
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::Ge("claims_ratio", 0.0))
                .expect(Expect::Ge("avg_premium", 0.0)),
            ),
            Check::query(
                "coalesce nulls",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     OPTIONAL MATCH (c)-[:FILED_CLAIM]->(claim:Claim)
                     WITH c,
                          count(claim) AS claim_count,
                          sum(claim.claim_amount) AS total_claims
                     RETURN c.customer_number AS customer,
                            claim_count,
                            COALESCE(total_claims, 0.0) AS total_claim_amount
                     LIMIT 5",
                )
                .at_least(5)
                .expect(Expect::Ge("total_claim_amount", 0.0)),
            ),
            Check::query(
                "aggregate functions",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     RETURN count(c) AS total_customers,
                            count(p) AS total_policies,
                            sum(p.annual_premium) AS total_premium,
                            avg(p.annual_premium) AS avg_premium,
                            min(p.annual_premium) AS min_premium,
                            max(p.annual_premium) AS max_premium",
                )
                .exactly(1)
                .expect(Expect::Gt("total_customers", 0.0))
                .expect(Expect::Gt("total_policies", 0.0))
                .expect(Expect::Gt("total_premium", 0.0))
                .expect(Expect::Gt("avg_premium", 0.0))
                .expect(Expect::Gt("min_premium", 0.0))
                .expect(Expect::GeColumn("max_premium", "min_premium")),
            ),
            Check::query(
                "grouping with filters",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     WITH c, count(p) AS policy_count, sum(p.annual_premium) AS total_premium
                     WHERE policy_count > 0
                     RETURN c.risk_tier AS risk_tier,
                            count(c) AS customer_count,
                            avg(policy_count) AS avg_policies_per_customer,
                            sum(total_premium) AS tier_total_premium
                     ORDER BY tier_total_premium DESC",
                )
                .at_least(1)
                .expect(Expect::Gt("customer_count", 0.0))
                .expect(Expect::Gt("tier_total_premium", 0.0)),
            ),
            Check::query(
                "cross-sell identification",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     WITH c, collect(DISTINCT p.product_type) AS held_products, count(p) AS policy_count
                     WHERE policy_count > 0 AND size(held_products) < 3
                     RETURN c.customer_number AS customer,
                            policy_count,
                            held_products,
                            CASE
                              WHEN NOT 'Home Insurance' IN held_products THEN 'Home Insurance'
                              WHEN NOT 'Auto Insurance' IN held_products THEN 'Auto Insurance'
                              WHEN NOT 'Life Insurance' IN held_products THEN 'Life Insurance'
                              ELSE 'Umbrella Policy'
                            END AS recommended_product
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::Gt("policy_count", 0.0))
                .expect(Expect::NonEmptyList("held_products"))
                .expect(Expect::NotNull("recommended_product")),
            ),
            Check::query(
                "collect aggregation",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     RETURN c.customer_number AS customer,
                            collect(p.product_type) AS products,
                            collect(p.annual_premium) AS premiums,
                            size(collect(p)) AS policy_count
                     LIMIT 5",
                )
                .at_least(5)
                .expect(Expect::NonEmptyList("products"))
                .expect(Expect::NonEmptyList("premiums"))
                .expect(Expect::ListLenEquals("products", "policy_count")),
            ),
            // Few datasets link claims to policies this way, so rows are optional.
            Check::informational(
                "claim chains",
                "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)<-[:FILED_CLAIM_FOR]-(claim:Claim)
                 RETURN c.customer_number AS customer,
                        p.policy_number AS policy,
                        count(claim) AS claims_on_policy
                 ORDER BY claims_on_policy DESC
                 LIMIT 5",
            ),
            Check::query(
                "distinct counting",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     MATCH (a:Agent)-[:SERVICES]->(c)
                     RETURN a.agent_id AS agent,
                            count(DISTINCT c) AS unique_customers,
                            count(DISTINCT p) AS unique_policies,
                            count(p) AS total_policy_records
                     ORDER BY unique_customers DESC
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::GeColumn("total_policy_records", "unique_policies")),
            ),
            Check::query(
                "conditional aggregation",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     OPTIONAL MATCH (c)-[:FILED_CLAIM]->(claim:Claim)
                     WHERE claim.claim_status = 'Approved'
                     RETURN c.customer_number AS customer,
                            count(p) AS total_policies,
                            count(claim) AS approved_claims,
                            CASE
                              WHEN count(claim) = 0 THEN 'No Claims'
                              WHEN count(claim) <= count(p) THEN 'Normal'
                              ELSE 'High Claims'
                            END AS claims_profile
                     LIMIT 5",
                )
                .at_least(5)
                .expect(Expect::Ge("total_policies", 0.0))
                .expect(Expect::Ge("approved_claims", 0.0))
                .expect(Expect::OneOf(
                    "claims_profile",
                    vec![json!("No Claims"), json!("Normal"), json!("High Claims")],
                )),
            ),
            Check::summary(vec![
                "Customer",
                "Policy",
                "Claim",
                "RiskAssessment",
                "CustomerProfile",
                "PredictiveModel",
            ]),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use labkit_graph::Param;

    #[test]
    fn test_day_one_numbers() {
        let numbers: Vec<u32> = suites().iter().map(|s| s.number.0).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_lab_one_relationship_minimums() {
        let lab1 = lab01();
        let minimums: Vec<(&str, i64)> = lab1
            .checks
            .iter()
            .filter_map(|c| match c.kind {
                CheckKind::MinRelationships {
                    rel_type: Some(rel_type),
                    min,
                } => Some((rel_type, min)),
                _ => None,
            })
            .collect();
        assert_eq!(minimums, vec![("HOLDS_POLICY", 3), ("BASED_ON", 3)]);
    }

    #[test]
    fn test_bulk_customers_bound_as_list() {
        let lab4 = lab04();
        let check = lab4
            .checks
            .iter()
            .find(|c| c.name == "bulk imported customers")
            .unwrap();
        let CheckKind::Query(spec) = &check.kind else {
            panic!("expected a query check");
        };
        assert_eq!(spec.params.len(), 1);
        let (key, value) = &spec.params[0];
        assert_eq!(key, "customer_numbers");
        assert!(matches!(value, Param::TextList(ids) if ids.len() == 4));
    }

    #[test]
    fn test_age_query_filters_before_return() {
        let lab5 = lab05();
        let check = lab5.checks.iter().find(|c| c.name == "age and tenure").unwrap();
        let CheckKind::Query(spec) = &check.kind else {
            panic!("expected a query check");
        };
        let where_at = spec.cypher.find("WHERE age").unwrap();
        let return_at = spec.cypher.find("RETURN").unwrap();
        assert!(where_at < return_at);
    }
}
