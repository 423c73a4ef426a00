//! Day 3: labs 12-17, application development and the finished platform.

use serde_json::json;

use labkit_graph::Plugin;

use super::LabSuite;
use crate::check::{Check, CheckKind, Expect, QuerySpec};

pub(super) fn suites() -> Vec<LabSuite> {
    vec![lab12(), lab13(), lab14(), lab15(), lab16(), lab17()]
}

fn lab12() -> LabSuite {
    LabSuite::new(
        12,
        "Python Driver & Service Architecture",
        "database reachable through the driver",
        vec![
            Check::connectivity(),
            Check::query(
                "simple query",
                QuerySpec::new("RETURN 1 AS test")
                    .exactly(1)
                    .expect(Expect::Eq("test", json!(1))),
            ),
            Check::query(
                "parameterized query",
                QuerySpec::new("RETURN $param AS result")
                    .param("param", "test_value")
                    .exactly(1)
                    .expect(Expect::Eq("result", json!("test_value"))),
            ),
            Check::query(
                "customer retrieval",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     RETURN c.customer_number AS customer_number,
                            c.first_name AS first_name,
                            c.last_name AS last_name
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::NotNull("customer_number"))
                .expect(Expect::NotNull("first_name")),
            ),
            Check::query(
                "policy retrieval",
                QuerySpec::new(
                    "MATCH (p:Policy)
                     RETURN p.policy_number AS policy_number,
                            p.product_type AS product_type,
                            p.annual_premium AS premium
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::NotNull("policy_number")),
            ),
            Check::query(
                "relationship traversal",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     RETURN c.customer_number AS customer, p.policy_number AS policy
                     LIMIT 5",
                )
                .at_least(1),
            ),
            Check::query(
                "aggregation",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     RETURN c.customer_number AS customer,
                            count(p) AS policy_count,
                            sum(p.annual_premium) AS total_premium
                     LIMIT 5",
                )
                .at_least(1)
                .expect(Expect::Gt("policy_count", 0.0)),
            ),
            Check::new("committed write transactions", CheckKind::WriteTransaction),
            Check::new("failed transaction rolls back", CheckKind::TransactionRollback),
            Check::new("invalid cypher rejected", CheckKind::RejectsInvalidCypher),
            Check::plugin_version(Plugin::Apoc),
            Check::plugin_version(Plugin::Gds),
            Check::sandbox(
                "create node through driver",
                vec![
                    QuerySpec::new(
                        "CREATE (n:TestNode {name: $name, created: datetime()})
                         RETURN n.name AS name",
                    )
                    .param("name", "Test Customer")
                    .exactly(1)
                    .expect(Expect::Eq("name", json!("Test Customer"))),
                    QuerySpec::new("MATCH (n:TestNode {name: $name}) RETURN count(n) AS count")
                        .param("name", "Test Customer")
                        .expect(Expect::Eq("count", json!(1))),
                ],
            ),
            Check::sandbox(
                "parameterized customer lookup",
                vec![
                    QuerySpec::new(
                        "CREATE (c:TestCustomer {name: $name, email: $email, created_at: datetime()})",
                    )
                    .param("name", "Alice Smith")
                    .param("email", "alice@example.com"),
                    QuerySpec::new(
                        "MATCH (c:TestCustomer {email: $email})
                         RETURN c.name AS name, c.email AS email",
                    )
                    .param("email", "alice@example.com")
                    .exactly(1)
                    .expect(Expect::Eq("name", json!("Alice Smith")))
                    .expect(Expect::Eq("email", json!("alice@example.com"))),
                ],
            ),
            Check::sandbox(
                "customer service layer",
                vec![
                    QuerySpec::new(
                        "CREATE (c:TestCustomer {
                             customer_id: $customer_id,
                             name: $name,
                             email: $email,
                             created_at: datetime()
                         })
                         RETURN c.customer_id AS customer_id",
                    )
                    .param("customer_id", "SVC-0001")
                    .param("name", "Bob Johnson")
                    .param("email", "bob@example.com")
                    .exactly(1)
                    .expect(Expect::Eq("customer_id", json!("SVC-0001"))),
                    QuerySpec::new(
                        "MATCH (c:TestCustomer {customer_id: $customer_id})
                         RETURN c.customer_id AS customer_id, c.name AS name, c.email AS email",
                    )
                    .param("customer_id", "SVC-0001")
                    .exactly(1)
                    .expect(Expect::Eq("name", json!("Bob Johnson")))
                    .expect(Expect::Eq("email", json!("bob@example.com"))),
                ],
            ),
            Check::summary(Vec::new()),
        ],
    )
}

fn lab13() -> LabSuite {
    LabSuite::new(
        13,
        "Insurance Web Application Development",
        "database ready for API integration",
        vec![
            Check::min_nodes("Customer", 10),
            Check::min_nodes("Policy", 10),
            Check::min_nodes("Claim", 3),
            Check::query(
                "customer lookup",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     RETURN c.customer_number AS id,
                            c.first_name AS firstName,
                            c.last_name AS lastName,
                            c.email AS email
                     LIMIT 1",
                )
                .at_least(1)
                .expect(Expect::NotNull("id")),
            ),
            Check::query(
                "policy search",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     RETURN c.customer_number AS customerId,
                            p.policy_number AS policyNumber,
                            p.product_type AS type,
                            p.annual_premium AS premium
                     LIMIT 1",
                )
                .at_least(1),
            ),
            Check::query(
                "claims submission",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:FILED_CLAIM]->(cl:Claim)
                     RETURN cl.claim_number AS claimNumber,
                            cl.claim_type AS type,
                            cl.claim_status AS status,
                            cl.claim_amount AS amount
                     LIMIT 1",
                )
                .at_least(1),
            ),
            Check::query(
                "customer 360",
                QuerySpec::new(
                    "MATCH (c:Customer {customer_number: 'CUST-001234'})
                     OPTIONAL MATCH (c)-[:HOLDS_POLICY]->(p:Policy)
                     OPTIONAL MATCH (c)-[:FILED_CLAIM]->(cl:Claim)
                     RETURN c.customer_number AS customer,
                            count(DISTINCT p) AS policies,
                            count(DISTINCT cl) AS claims",
                )
                .at_least(1),
            ),
            Check::query(
                "agent dashboard",
                QuerySpec::new(
                    "MATCH (a:Agent)-[:SERVICES]->(c:Customer)
                     RETURN a.agent_id AS agentId, count(c) AS customerCount
                     LIMIT 1",
                )
                .at_least(1),
            ),
            Check::query(
                "dashboard metrics",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     WITH count(DISTINCT c) AS customers,
                          count(p) AS policies,
                          sum(p.annual_premium) AS premium
                     RETURN customers, policies, round(premium * 100) / 100 AS totalPremium",
                )
                .exactly(1),
            ),
            Check::sandbox("customer api crud", customer_crud_steps()),
            Check::sandbox(
                "policy search api",
                vec![
                    QuerySpec::new(
                        "CREATE (c:TestCustomer {customer_number: 'CUST-001', name: 'Test User'})
                         CREATE (p1:TestPolicy {policy_number: 'POL-001', type: 'AUTO', premium: 1000})
                         CREATE (p2:TestPolicy {policy_number: 'POL-002', type: 'HOME', premium: 800})
                         CREATE (c)-[:HOLDS_TEST_POLICY]->(p1)
                         CREATE (c)-[:HOLDS_TEST_POLICY]->(p2)",
                    ),
                    QuerySpec::new(
                        "MATCH (p:TestPolicy {type: $policy_type})
                         RETURN p.policy_number AS policy_number, p.premium AS premium
                         ORDER BY p.premium DESC",
                    )
                    .param("policy_type", "AUTO")
                    .exactly(1)
                    .expect(Expect::Eq("policy_number", json!("POL-001"))),
                ],
            ),
            Check::sandbox(
                "api not-found lookup",
                vec![QuerySpec::new(
                    "MATCH (c:TestCustomer {customer_number: $customer_number})
                     RETURN c.customer_number AS customer_number",
                )
                .param("customer_number", "NONEXISTENT")
                .exactly(0)],
            ),
            Check::summary(Vec::new()),
        ],
    )
}

fn lab14() -> LabSuite {
    LabSuite::new(
        14,
        "Production Insurance Infrastructure",
        "production-ready schema and audit coverage",
        vec![
            Check::min_constraints(None, 5),
            Check::min_indexes(None, 5),
            Check::query(
                "status query",
                QuerySpec::new("RETURN 'healthy' AS status")
                    .exactly(1)
                    .expect(Expect::Eq("status", json!("healthy"))),
            ),
            // Summary nodes such as BusinessKPI have no relationships.
            Check::advisory(
                "isolated nodes",
                QuerySpec::new(
                    "MATCH (n)
                     WHERE NOT EXISTS { (n)-[]-() }
                     RETURN count(n) AS isolated_nodes",
                )
                .exactly(1)
                .expect(Expect::Le("isolated_nodes", 20.0)),
            ),
            Check::timed(
                "customer lookup speed",
                "MATCH (c:Customer {customer_number: 'CUST-001234'})
                 RETURN c.customer_number AS customer_number, c.email AS email",
                1000,
                false,
            ),
            Check::timed(
                "policy search speed",
                "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                 RETURN p.policy_number AS policy_number, p.annual_premium AS premium
                 LIMIT 10",
                1000,
                false,
            ),
            Check::timed(
                "open claims speed",
                "MATCH (cl:Claim) WHERE cl.claim_status = 'Open'
                 RETURN cl.claim_number AS claim_number, cl.claim_amount AS amount
                 LIMIT 10",
                1000,
                false,
            ),
            Check::query(
                "audited entities",
                QuerySpec::count_at_least(
                    "MATCH (n)
                     WHERE n.created_at IS NOT NULL
                     RETURN count(n) AS audited_entities",
                    "audited_entities",
                    100,
                ),
            ),
            Check::sandbox(
                "dashboard aggregation",
                vec![
                    QuerySpec::new(
                        "CREATE (c1:TestCustomer {customer_number: 'CUST-001', name: 'Alice'})
                         CREATE (c2:TestCustomer {customer_number: 'CUST-002', name: 'Bob'})
                         CREATE (p1:TestPolicy {policy_number: 'POL-001', annual_premium: 1200, status: 'active'})
                         CREATE (p2:TestPolicy {policy_number: 'POL-002', annual_premium: 800, status: 'active'})
                         CREATE (p3:TestPolicy {policy_number: 'POL-003', annual_premium: 1500, status: 'pending'})
                         CREATE (c1)-[:HOLDS_TEST_POLICY]->(p1)
                         CREATE (c1)-[:HOLDS_TEST_POLICY]->(p2)
                         CREATE (c2)-[:HOLDS_TEST_POLICY]->(p3)",
                    ),
                    QuerySpec::new(
                        "MATCH (c:TestCustomer)-[:HOLDS_TEST_POLICY]->(p:TestPolicy)
                         WITH count(DISTINCT c) AS total_customers,
                              count(DISTINCT p) AS total_policies,
                              sum(p.annual_premium) AS total_premium
                         RETURN total_customers, total_policies, total_premium",
                    )
                    .exactly(1)
                    .expect(Expect::Eq("total_customers", json!(2)))
                    .expect(Expect::Eq("total_policies", json!(3)))
                    .expect(Expect::Eq("total_premium", json!(3500))),
                ],
            ),
            Check::sandbox(
                "customer search",
                vec![
                    QuerySpec::new(
                        "CREATE (c1:TestCustomer {name: 'Alice Smith', email: 'alice@example.com'})
                         CREATE (c2:TestCustomer {name: 'Bob Smith', email: 'bob@example.com'})
                         CREATE (c3:TestCustomer {name: 'Charlie Jones', email: 'charlie@example.com'})",
                    ),
                    QuerySpec::new(
                        "MATCH (c:TestCustomer)
                         WHERE c.name CONTAINS $search_term
                         RETURN c.name AS name, c.email AS email
                         ORDER BY c.name",
                    )
                    .param("search_term", "Smith")
                    .expect(Expect::ColumnSequence(
                        "name",
                        vec![json!("Alice Smith"), json!("Bob Smith")],
                    )),
                ],
            ),
            Check::summary(Vec::new()),
        ],
    )
}

fn lab15() -> LabSuite {
    LabSuite::new(
        15,
        "Complete Insurance Platform Integration",
        "600 nodes, 400 relationships",
        vec![
            Check::query(
                "end-to-end customer journeys",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     MATCH (c)-[:HAS_PROFILE]->(profile:CustomerProfile)
                     OPTIONAL MATCH (c)-[:FILED_CLAIM]->(cl:Claim)
                     OPTIONAL MATCH (c)-[:MADE_PAYMENT]->(payment:Payment)
                     RETURN c.customer_number AS customer,
                            count(DISTINCT p) AS policies,
                            count(DISTINCT cl) AS claims,
                            count(DISTINCT payment) AS payments
                     LIMIT 5",
                )
                .at_least(1),
            ),
            Check::informational(
                "contact channels",
                "MATCH (c:Customer)
                 RETURN c.email IS NOT NULL AS has_email,
                        c.phone IS NOT NULL AS has_phone,
                        count(*) AS cnt",
            ),
            Check::query(
                "customers with analytics",
                QuerySpec::count_at_least(
                    "MATCH (c:Customer)-[:HAS_PREDICTION]->(pm:PredictiveModel)
                     MATCH (c)-[:HAS_PROFILE]->(profile:CustomerProfile)
                     RETURN count(c) AS customers_with_analytics",
                    "customers_with_analytics",
                    10,
                ),
            ),
            Check::informational(
                "business kpis",
                "MATCH (kpi:BusinessKPI)
                 RETURN kpi.total_customers AS customers,
                        kpi.total_active_policies AS policies,
                        kpi.total_premium_portfolio AS premium",
            ),
            Check::informational(
                "fraud scoring",
                "MATCH (cl:Claim)
                 WHERE cl.fraud_score IS NOT NULL
                 RETURN count(cl) AS claims_with_fraud_scores",
            ),
            Check::total_nodes(600),
            Check::total_relationships(400),
            Check::query(
                "platform analytics",
                QuerySpec::new(
                    "MATCH (c:Customer)
                     OPTIONAL MATCH (c)-[:HOLDS_POLICY]->(p:Policy)
                     OPTIONAL MATCH (c)-[:FILED_CLAIM]->(cl:Claim)
                     WITH count(DISTINCT c) AS customers,
                          count(DISTINCT p) AS policies,
                          count(DISTINCT cl) AS claims
                     RETURN customers, policies, claims",
                )
                .exactly(1),
            ),
            Check::pooled_queries(5),
            Check::query(
                "health check",
                QuerySpec::new("RETURN 1 AS health")
                    .exactly(1)
                    .expect(Expect::Eq("health", json!(1))),
            ),
            Check::sandbox(
                "monitoring metrics",
                vec![
                    QuerySpec::new(
                        "CREATE (c:TestCustomer {name: 'Metrics Test'})
                         CREATE (p:TestPolicy {policy_number: 'POL-METRICS-001'})",
                    ),
                    QuerySpec::new(
                        "MATCH (c:TestCustomer)
                         WITH count(c) AS customer_count
                         MATCH (p:TestPolicy)
                         RETURN customer_count, count(p) AS policy_count",
                    )
                    .exactly(1)
                    .expect(Expect::Ge("customer_count", 1.0))
                    .expect(Expect::Ge("policy_count", 1.0)),
                ],
            ),
            Check::sandbox("end-to-end customer workflow", customer_workflow_steps()),
            Check::sandbox(
                "bulk operations",
                vec![
                    QuerySpec::new(
                        "UNWIND range(1, $batch_size) AS i
                         CREATE (c:TestCustomer {
                             customer_number: 'BULK-' + toString(i),
                             name: 'Bulk Customer ' + toString(i),
                             created_at: datetime()
                         })",
                    )
                    .param("batch_size", BULK_BATCH),
                    QuerySpec::new(
                        "MATCH (c:TestCustomer)
                         WHERE c.customer_number STARTS WITH 'BULK-'
                         RETURN count(c) AS count",
                    )
                    .expect(Expect::Eq("count", json!(BULK_BATCH))),
                ],
            ),
            Check::summary(Vec::new()),
        ],
    )
}

fn lab16() -> LabSuite {
    LabSuite::new(
        16,
        "Multi-Line Insurance Platform",
        "multi-line product portfolio",
        vec![
            Check::query(
                "product types",
                QuerySpec::new(
                    "MATCH (p:Product)
                     RETURN p.product_type AS type, count(*) AS cnt",
                )
                .at_least(2),
            ),
            Check::informational(
                "cross-product customers",
                "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                 WITH c, collect(DISTINCT p.product_type) AS products
                 WHERE size(products) > 1
                 RETURN count(c) AS cross_product_customers",
            ),
            Check::query(
                "portfolio by product",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     RETURN p.product_type AS product,
                            count(DISTINCT c) AS customers,
                            sum(p.annual_premium) AS total_premium",
                )
                .at_least(1),
            ),
            Check::informational(
                "bundling opportunities",
                "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                 WITH c, collect(p.product_type) AS products
                 RETURN size(products) AS product_count, count(c) AS customer_count
                 ORDER BY product_count DESC",
            ),
            Check::query(
                "cross-product analysis",
                QuerySpec::new(
                    "MATCH (c:Customer)-[:HOLDS_POLICY]->(p:Policy)
                     WITH c, collect(DISTINCT p.product_type) AS products
                     RETURN size(products) AS product_count, count(c) AS customers
                     ORDER BY product_count DESC",
                )
                .at_least(1)
                .expect(Expect::Gt("customers", 0.0)),
            ),
            Check::sandbox(
                "multi-line product support",
                vec![
                    QuerySpec::new(
                        "CREATE (auto:TestPolicy {type: 'AUTO', product_line: 'Personal', premium: 1200})
                         CREATE (home:TestPolicy {type: 'HOME', product_line: 'Personal', premium: 800})
                         CREATE (commercial:TestPolicy {type: 'COMMERCIAL', product_line: 'Business', premium: 5000})
                         CREATE (life:TestPolicy {type: 'LIFE', product_line: 'Life', premium: 2000})",
                    ),
                    QuerySpec::new(
                        "MATCH (p:TestPolicy)
                         RETURN p.product_line AS line,
                                count(p) AS count,
                                sum(p.premium) AS total_premium
                         ORDER BY line",
                    )
                    .at_least(3),
                ],
            ),
            Check::sandbox(
                "cross-sell opportunities",
                vec![
                    QuerySpec::new(
                        "CREATE (c:TestCustomer {customer_number: 'CUST-CROSS-001', name: 'Cross Sell Customer'})
                         CREATE (p:TestPolicy {policy_number: 'POL-AUTO-001', type: 'AUTO'})
                         CREATE (c)-[:HOLDS_TEST_POLICY]->(p)",
                    ),
                    QuerySpec::new(
                        "MATCH (c:TestCustomer {customer_number: 'CUST-CROSS-001'})
                         WHERE NOT EXISTS {
                             MATCH (c)-[:HOLDS_TEST_POLICY]->(p:TestPolicy {type: 'HOME'})
                         }
                         RETURN c.customer_number AS customer_number, 'HOME' AS opportunity",
                    )
                    .exactly(1)
                    .expect(Expect::Eq("opportunity", json!("HOME"))),
                ],
            ),
            Check::summary(vec!["Product"]),
        ],
    )
}

fn lab17() -> LabSuite {
    LabSuite::new(
        17,
        "Innovation Showcase",
        "1000+ nodes, 1300+ relationships",
        vec![
            Check::total_nodes(600),
            Check::total_relationships(750),
            Check::labels_present(
                vec![
                    "Customer",
                    "Policy",
                    "Claim",
                    "Agent",
                    "Branch",
                    "Department",
                    "Product",
                ],
                true,
            ),
            Check::labels_present(
                vec!["CustomerProfile", "RiskAssessment", "PredictiveModel"],
                false,
            ),
            Check::informational(
                "predictive models",
                "MATCH (pm:PredictiveModel) RETURN count(pm) AS cnt",
            ),
            Check::informational(
                "customer profiles",
                "MATCH (cp:CustomerProfile) RETURN count(cp) AS cnt",
            ),
            Check::informational(
                "risk assessments",
                "MATCH (ra:RiskAssessment) RETURN count(ra) AS cnt",
            ),
            Check::informational(
                "platform integration",
                "MATCH (c:Customer)
                 OPTIONAL MATCH (c)-[:HOLDS_POLICY]->(p:Policy)
                 OPTIONAL MATCH (c)-[:FILED_CLAIM]->(cl:Claim)
                 OPTIONAL MATCH (c)-[:HAS_PROFILE]->(profile)
                 WITH count(DISTINCT c) AS customers,
                      count(DISTINCT p) AS policies,
                      count(DISTINCT cl) AS claims,
                      count(DISTINCT profile) AS profiles
                 RETURN customers, policies, claims, profiles",
            ),
            Check::sandbox(
                "referral network depth",
                vec![
                    QuerySpec::new(
                        "CREATE (c1:TestCustomer {name: 'Customer1'})
                         CREATE (c2:TestCustomer {name: 'Customer2'})
                         CREATE (c3:TestCustomer {name: 'Customer3'})
                         CREATE (c1)-[:REFERRED]->(c2)
                         CREATE (c2)-[:REFERRED]->(c3)
                         CREATE (c1)-[:REFERRED]->(c3)",
                    ),
                    QuerySpec::new(
                        "MATCH path = (c1:TestCustomer)-[:REFERRED*]->(c2:TestCustomer)
                         RETURN c1.name AS source, c2.name AS target, length(path) AS depth
                         ORDER BY depth DESC
                         LIMIT 1",
                    )
                    .exactly(1)
                    .expect(Expect::Ge("depth", 1.0)),
                ],
            ),
            Check::sandbox(
                "temporal queries",
                vec![
                    QuerySpec::new(
                        "CREATE (c:TestCustomer {
                             name: 'Temporal Test',
                             created_at: datetime(),
                             last_updated: datetime()
                         })",
                    ),
                    QuerySpec::new(
                        "MATCH (c:TestCustomer {name: 'Temporal Test'})
                         WHERE c.created_at <= datetime()
                         RETURN c.name AS name, toString(c.created_at) AS created",
                    )
                    .exactly(1)
                    .expect(Expect::Eq("name", json!("Temporal Test")))
                    .expect(Expect::NotNull("created")),
                ],
            ),
            // The agent also carries TestNode so the sandbox sweep removes it.
            Check::sandbox(
                "advanced pattern matching",
                vec![
                    QuerySpec::new(
                        "CREATE (c:TestCustomer {name: 'Customer'})
                         CREATE (p:TestPolicy {type: 'AUTO'})
                         CREATE (a:Agent:TestNode {name: 'Agent'})
                         CREATE (c)-[:HOLDS_TEST_POLICY]->(p)
                         CREATE (a)-[:SERVICES]->(c)",
                    ),
                    QuerySpec::new(
                        "MATCH (a:Agent)-[:SERVICES]->(c:TestCustomer)-[:HOLDS_TEST_POLICY]->(p:TestPolicy)
                         RETURN a.name AS agent, c.name AS customer, p.type AS policy_type",
                    )
                    .exactly(1)
                    .expect(Expect::Eq("agent", json!("Agent")))
                    .expect(Expect::Eq("policy_type", json!("AUTO"))),
                ],
            ),
            Check::summary(Vec::new()),
        ],
    )
}

const BULK_BATCH: i64 = 100;

/// Create, read, update and delete one customer the way the lab's API does.
fn customer_crud_steps() -> Vec<QuerySpec> {
    let read = |email: &str| {
        QuerySpec::new(
            "MATCH (c:TestCustomer {customer_number: $customer_number})
             RETURN c.email AS email",
        )
        .param("customer_number", "CUST-TEST-001")
        .exactly(1)
        .expect(Expect::Eq("email", json!(email)))
    };

    vec![
        QuerySpec::new(
            "CREATE (c:TestCustomer {
                 customer_number: $customer_number,
                 first_name: $first_name,
                 last_name: $last_name,
                 email: $email,
                 created_at: datetime()
             })
             RETURN c.first_name AS first_name",
        )
        .param("customer_number", "CUST-TEST-001")
        .param("first_name", "Jane")
        .param("last_name", "Doe")
        .param("email", "jane.doe@example.com")
        .exactly(1)
        .expect(Expect::Eq("first_name", json!("Jane"))),
        read("jane.doe@example.com"),
        QuerySpec::new(
            "MATCH (c:TestCustomer {customer_number: $customer_number})
             SET c.email = $email, c.updated_at = datetime()",
        )
        .param("customer_number", "CUST-TEST-001")
        .param("email", "jane.updated@example.com"),
        read("jane.updated@example.com"),
        QuerySpec::new(
            "MATCH (c:TestCustomer {customer_number: $customer_number})
             DETACH DELETE c",
        )
        .param("customer_number", "CUST-TEST-001"),
        QuerySpec::new(
            "MATCH (c:TestCustomer {customer_number: $customer_number})
             RETURN c.email AS email",
        )
        .param("customer_number", "CUST-TEST-001")
        .exactly(0),
    ]
}

/// Customer creation through policy assignment, checked as one join.
fn customer_workflow_steps() -> Vec<QuerySpec> {
    const CUSTOMER: &str = "CUST-E2E-0001";
    const POLICY: &str = "POL-E2E-0001";

    vec![
        QuerySpec::new(
            "CREATE (c:TestCustomer {
                 customer_number: $customer_number,
                 name: 'End-to-End Test Customer',
                 email: 'e2e@example.com',
                 created_at: datetime()
             })",
        )
        .param("customer_number", CUSTOMER),
        QuerySpec::new(
            "CREATE (p:TestPolicy {
                 policy_number: $policy_number,
                 type: 'AUTO',
                 annual_premium: 1500,
                 status: 'active',
                 created_at: datetime()
             })",
        )
        .param("policy_number", POLICY),
        QuerySpec::new(
            "MATCH (c:TestCustomer {customer_number: $customer_number})
             MATCH (p:TestPolicy {policy_number: $policy_number})
             CREATE (c)-[:HOLDS_TEST_POLICY {since: datetime()}]->(p)",
        )
        .param("customer_number", CUSTOMER)
        .param("policy_number", POLICY),
        QuerySpec::new(
            "MATCH (c:TestCustomer {customer_number: $customer_number})
                   -[r:HOLDS_TEST_POLICY]->(p:TestPolicy {policy_number: $policy_number})
             RETURN c.name AS customer_name,
                    p.type AS policy_type,
                    p.annual_premium AS premium,
                    r.since IS NOT NULL AS has_link_date",
        )
        .param("customer_number", CUSTOMER)
        .param("policy_number", POLICY)
        .exactly(1)
        .expect(Expect::Eq("customer_name", json!("End-to-End Test Customer")))
        .expect(Expect::Eq("policy_type", json!("AUTO")))
        .expect(Expect::Eq("premium", json!(1500)))
        .expect(Expect::Eq("has_link_date", json!(true))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use labkit_graph::Record;

    fn sandbox_steps(suite: LabSuite, name: &str) -> Vec<QuerySpec> {
        suite
            .checks
            .into_iter()
            .find_map(|c| match c.kind {
                CheckKind::Sandbox(steps) if c.name == name => Some(steps),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn test_driver_lab_checks_both_plugins() {
        let plugins: Vec<Plugin> = lab12()
            .checks
            .iter()
            .filter_map(|c| match c.kind {
                CheckKind::PluginVersion(p) => Some(p),
                _ => None,
            })
            .collect();
        assert_eq!(plugins, vec![Plugin::Apoc, Plugin::Gds]);
    }

    #[test]
    fn test_crud_ends_with_customer_gone() {
        let steps = customer_crud_steps();
        assert_eq!(steps.len(), 6);
        let last = steps.last().unwrap();
        assert!(last.evaluate(&[]).is_ok());

        let leftover: Record = [("email", json!("jane.updated@example.com"))]
            .into_iter()
            .collect();
        assert!(last.evaluate(&[leftover]).is_err());
    }

    #[test]
    fn test_crud_reads_see_the_update() {
        let steps = customer_crud_steps();
        let after_update = &steps[3];
        let stale: Record = [("email", json!("jane.doe@example.com"))].into_iter().collect();
        let fresh: Record = [("email", json!("jane.updated@example.com"))].into_iter().collect();
        assert!(after_update.evaluate(&[stale]).is_err());
        assert!(after_update.evaluate(&[fresh]).is_ok());
    }

    #[test]
    fn test_dashboard_totals() {
        let steps = sandbox_steps(lab14(), "dashboard aggregation");
        let totals: Record = [
            ("total_customers", json!(2)),
            ("total_policies", json!(3)),
            ("total_premium", json!(3500)),
        ]
        .into_iter()
        .collect();
        assert!(steps[1].evaluate(&[totals]).is_ok());

        let short: Record = [
            ("total_customers", json!(2)),
            ("total_policies", json!(2)),
            ("total_premium", json!(2000)),
        ]
        .into_iter()
        .collect();
        assert!(steps[1].evaluate(&[short]).is_err());
    }

    #[test]
    fn test_customer_search_is_ordered() {
        let steps = sandbox_steps(lab14(), "customer search");
        let row = |name: &str| -> Record { [("name", json!(name))].into_iter().collect() };
        assert!(steps[1]
            .evaluate(&[row("Alice Smith"), row("Bob Smith")])
            .is_ok());
        assert!(steps[1]
            .evaluate(&[row("Bob Smith"), row("Alice Smith")])
            .is_err());
    }

    #[test]
    fn test_bulk_batch_size_bound_and_checked() {
        let steps = sandbox_steps(lab15(), "bulk operations");
        assert_eq!(
            steps[0].params,
            vec![("batch_size".to_string(), labkit_graph::Param::Int(BULK_BATCH))]
        );
        let count: Record = [("count", json!(BULK_BATCH))].into_iter().collect();
        assert!(steps[1].evaluate(&[count]).is_ok());
    }

    #[test]
    fn test_day_three_numbers() {
        let numbers: Vec<u32> = suites().iter().map(|s| s.number.0).collect();
        assert_eq!(numbers, vec![12, 13, 14, 15, 16, 17]);
    }

    #[test]
    fn test_driver_lab_exercises_transactions() {
        let kinds: Vec<&'static str> = lab12()
            .checks
            .iter()
            .filter_map(|c| match c.kind {
                CheckKind::WriteTransaction => Some("write"),
                CheckKind::TransactionRollback => Some("rollback"),
                CheckKind::RejectsInvalidCypher => Some("invalid"),
                _ => None,
            })
            .collect();
        assert_eq!(kinds, vec!["write", "rollback", "invalid"]);
    }

    #[test]
    fn test_core_labels_required_analytics_optional() {
        let required: Vec<bool> = lab17()
            .checks
            .iter()
            .filter_map(|c| match &c.kind {
                CheckKind::LabelsPresent { required, .. } => Some(*required),
                _ => None,
            })
            .collect();
        assert_eq!(required, vec![true, false]);
    }
}
