// =============================================================================
// XBRL Concept Table
// =============================================================================

use filings_core::{ConceptFact, StatementKind};

/// Presentation section within a statement.
///
/// Variants are declared in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    /// Balance sheet assets.
    Assets,
    /// Balance sheet liabilities.
    Liabilities,
    /// Balance sheet equity.
    Equity,
    /// Revenue and cost of revenue.
    Revenue,
    /// Expenses and income.
    Income,
    /// Per-share data and share counts.
    Eps,
    /// Cash flows from operating activities.
    OperatingActivities,
    /// Cash flows from investing activities.
    InvestingActivities,
    /// Cash flows from financing activities.
    FinancingActivities,
    /// Movements in stockholders' equity.
    EquityComponents,
    /// Comprehensive income items.
    ComprehensiveIncome,
}

impl Section {
    /// Display title.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Assets => "Assets",
            Self::Liabilities => "Liabilities",
            Self::Equity => "Equity",
            Self::Revenue => "Revenue",
            Self::Income => "Income",
            Self::Eps => "Earnings Per Share",
            Self::OperatingActivities => "Operating Activities",
            Self::InvestingActivities => "Investing Activities",
            Self::FinancingActivities => "Financing Activities",
            Self::EquityComponents => "Equity Components",
            Self::ComprehensiveIncome => "Comprehensive Income",
        }
    }
}

/// Where a known concept is presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConceptDefinition {
    /// Taxonomy namespace.
    pub taxonomy: &'static str,
    /// Concept tag.
    pub tag: &'static str,
    /// Statement the concept belongs to.
    pub kind: StatementKind,
    /// Section within the statement.
    pub section: Section,
    /// Display label.
    pub label: &'static str,
    /// Order within the section; lower first.
    pub order: u16,
}

const fn def(
    taxonomy: &'static str,
    tag: &'static str,
    kind: StatementKind,
    section: Section,
    label: &'static str,
    order: u16,
) -> ConceptDefinition {
    ConceptDefinition {
        taxonomy,
        tag,
        kind,
        section,
        label,
        order,
    }
}

const GAAP: &str = "us-gaap";
const IFRS: &str = "ifrs-full";

use Section as S;
use StatementKind::{
    BalanceSheet as BS, CashFlow as CF, ComprehensiveIncome as CI, Equity as EQ,
    IncomeStatement as IS,
};

/// Every concept that can appear on a statement.
#[rustfmt::skip]
pub static CONCEPTS: &[ConceptDefinition] = &[
    // Balance Sheet - Assets, most liquid first
    def(GAAP, "Assets", BS, S::Assets, "Total Assets", 0),
    def(GAAP, "AssetsCurrent", BS, S::Assets, "Current Assets", 10),
    def(GAAP, "CashAndCashEquivalentsAtCarryingValue", BS, S::Assets, "Cash and Cash Equivalents", 20),
    def(GAAP, "ShortTermInvestments", BS, S::Assets, "Short-Term Investments", 30),
    def(GAAP, "MarketableSecuritiesCurrent", BS, S::Assets, "Marketable Securities (Current)", 35),
    def(GAAP, "AccountsReceivableNetCurrent", BS, S::Assets, "Accounts Receivable", 40),
    def(GAAP, "InventoryNet", BS, S::Assets, "Inventory", 50),
    def(GAAP, "PrepaidExpenseAndOtherAssetsCurrent", BS, S::Assets, "Prepaid Expenses and Other", 60),
    def(GAAP, "OtherAssetsCurrent", BS, S::Assets, "Other Current Assets", 65),
    def(GAAP, "AssetsNoncurrent", BS, S::Assets, "Non-Current Assets", 100),
    def(GAAP, "MarketableSecuritiesNoncurrent", BS, S::Assets, "Marketable Securities (Non-Current)", 105),
    def(GAAP, "PropertyPlantAndEquipmentNet", BS, S::Assets, "Property, Plant and Equipment", 110),
    def(GAAP, "Goodwill", BS, S::Assets, "Goodwill", 120),
    def(GAAP, "IntangibleAssetsNetExcludingGoodwill", BS, S::Assets, "Intangible Assets", 130),
    def(GAAP, "OtherAssetsNoncurrent", BS, S::Assets, "Other Non-Current Assets", 140),
    // Balance Sheet - Liabilities, current before non-current
    def(GAAP, "Liabilities", BS, S::Liabilities, "Total Liabilities", 0),
    def(GAAP, "LiabilitiesCurrent", BS, S::Liabilities, "Current Liabilities", 10),
    def(GAAP, "AccountsPayableCurrent", BS, S::Liabilities, "Accounts Payable (Current)", 20),
    def(GAAP, "AccountsPayable", BS, S::Liabilities, "Accounts Payable (Total)", 25),
    def(GAAP, "AccruedLiabilitiesCurrent", BS, S::Liabilities, "Accrued Liabilities", 30),
    def(GAAP, "DeferredRevenueCurrent", BS, S::Liabilities, "Deferred Revenue (Current)", 40),
    def(GAAP, "CommercialPaper", BS, S::Liabilities, "Commercial Paper", 45),
    def(GAAP, "LongTermDebtCurrent", BS, S::Liabilities, "Current Portion of Long-Term Debt", 50),
    def(GAAP, "LiabilitiesNoncurrent", BS, S::Liabilities, "Non-Current Liabilities", 100),
    def(GAAP, "LongTermDebt", BS, S::Liabilities, "Total Debt", 110),
    def(GAAP, "LongTermDebtNoncurrent", BS, S::Liabilities, "Long-Term Debt", 120),
    def(GAAP, "DeferredRevenueNoncurrent", BS, S::Liabilities, "Deferred Revenue (Non-Current)", 130),
    def(GAAP, "DeferredTaxLiabilitiesNoncurrent", BS, S::Liabilities, "Deferred Tax Liabilities", 140),
    def(GAAP, "LiabilitiesAndStockholdersEquity", BS, S::Liabilities, "Total Liabilities and Equity", 200),
    // Balance Sheet - Equity
    def(GAAP, "StockholdersEquity", BS, S::Equity, "Stockholders' Equity", 0),
    def(GAAP, "StockholdersEquityIncludingPortionAttributableToNoncontrollingInterest", BS, S::Equity, "Total Equity", 5),
    def(GAAP, "CommonStockValue", BS, S::Equity, "Common Stock", 10),
    def(GAAP, "CommonStocksIncludingAdditionalPaidInCapital", BS, S::Equity, "Common Stock and Paid-In Capital", 12),
    def(GAAP, "AdditionalPaidInCapital", BS, S::Equity, "Additional Paid-In Capital", 15),
    def(GAAP, "TreasuryStockValue", BS, S::Equity, "Treasury Stock", 18),
    def(GAAP, "RetainedEarningsAccumulatedDeficit", BS, S::Equity, "Retained Earnings", 20),
    def(GAAP, "AccumulatedOtherComprehensiveIncomeLossNetOfTax", BS, S::Equity, "Accumulated Other Comprehensive Income", 30),
    def(GAAP, "MinorityInterest", BS, S::Equity, "Noncontrolling Interest", 40),
    // Income Statement - Revenue
    def(GAAP, "Revenues", IS, S::Revenue, "Total Revenue", 0),
    def(GAAP, "SalesRevenueNet", IS, S::Revenue, "Net Sales Revenue", 10),
    def(GAAP, "RevenueFromContractWithCustomerExcludingAssessedTax", IS, S::Revenue, "Revenue (Excluding Taxes)", 15),
    def(GAAP, "RevenueFromContractWithCustomerIncludingAssessedTax", IS, S::Revenue, "Revenue (Including Taxes)", 16),
    def(GAAP, "GrossProfit", IS, S::Revenue, "Gross Profit", 20),
    def(GAAP, "CostOfRevenue", IS, S::Revenue, "Cost of Revenue", 25),
    def(GAAP, "CostOfGoodsAndServicesSold", IS, S::Revenue, "Cost of Goods Sold", 30),
    // Income Statement - Income
    def(GAAP, "SellingGeneralAndAdministrativeExpense", IS, S::Income, "SG&A Expenses", 35),
    def(GAAP, "ResearchAndDevelopmentExpense", IS, S::Income, "R&D Expenses", 40),
    def(GAAP, "OperatingExpenses", IS, S::Income, "Operating Expenses", 42),
    def(GAAP, "OperatingIncomeLoss", IS, S::Income, "Operating Income", 45),
    def(GAAP, "NonoperatingIncomeExpense", IS, S::Income, "Non-Operating Income (Expense)", 47),
    def(GAAP, "InterestExpense", IS, S::Income, "Interest Expense", 50),
    def(GAAP, "IncomeLossFromContinuingOperationsBeforeIncomeTaxesExtraordinaryItemsNoncontrollingInterest", IS, S::Income, "Income Before Income Taxes", 52),
    def(GAAP, "IncomeTaxExpenseBenefit", IS, S::Income, "Income Tax Expense", 55),
    def(GAAP, "NetIncomeLoss", IS, S::Income, "Net Income", 60),
    def(GAAP, "ProfitLoss", IS, S::Income, "Profit/Loss", 62),
    def(GAAP, "NetIncomeLossAvailableToCommonStockholdersBasic", IS, S::Income, "Net Income to Common Stockholders", 65),
    // Income Statement - EPS
    def(GAAP, "EarningsPerShareBasic", IS, S::Eps, "EPS (Basic)", 0),
    def(GAAP, "EarningsPerShareDiluted", IS, S::Eps, "EPS (Diluted)", 10),
    def(GAAP, "WeightedAverageNumberOfSharesOutstandingBasic", IS, S::Eps, "Weighted Average Shares (Basic)", 20),
    def(GAAP, "WeightedAverageNumberOfDilutedSharesOutstanding", IS, S::Eps, "Weighted Average Shares (Diluted)", 30),
    // Cash Flow
    def(GAAP, "NetCashProvidedByUsedInOperatingActivities", CF, S::OperatingActivities, "Net Cash from Operations", 0),
    def(GAAP, "DepreciationDepletionAndAmortization", CF, S::OperatingActivities, "Depreciation and Amortization", 10),
    def(GAAP, "ShareBasedCompensation", CF, S::OperatingActivities, "Share-Based Compensation", 20),
    def(GAAP, "DeferredIncomeTaxExpenseBenefit", CF, S::OperatingActivities, "Deferred Income Taxes", 25),
    def(GAAP, "IncreaseDecreaseInAccountsReceivable", CF, S::OperatingActivities, "Change in Accounts Receivable", 30),
    def(GAAP, "IncreaseDecreaseInInventories", CF, S::OperatingActivities, "Change in Inventories", 40),
    def(GAAP, "IncreaseDecreaseInAccountsPayable", CF, S::OperatingActivities, "Change in Accounts Payable", 50),
    def(GAAP, "NetCashProvidedByUsedInInvestingActivities", CF, S::InvestingActivities, "Net Cash from Investing", 0),
    def(GAAP, "PaymentsToAcquirePropertyPlantAndEquipment", CF, S::InvestingActivities, "Capital Expenditures", 10),
    def(GAAP, "PaymentsToAcquireBusinessesNetOfCashAcquired", CF, S::InvestingActivities, "Acquisitions", 20),
    def(GAAP, "PaymentsToAcquireAvailableForSaleSecuritiesDebt", CF, S::InvestingActivities, "Purchases of Marketable Securities", 30),
    def(GAAP, "NetCashProvidedByUsedInFinancingActivities", CF, S::FinancingActivities, "Net Cash from Financing", 0),
    def(GAAP, "PaymentsOfDividends", CF, S::FinancingActivities, "Dividends Paid", 10),
    def(GAAP, "PaymentsForRepurchaseOfCommonStock", CF, S::FinancingActivities, "Share Repurchases", 20),
    def(GAAP, "ProceedsFromIssuanceOfLongTermDebt", CF, S::FinancingActivities, "Proceeds from Long-Term Debt", 30),
    def(GAAP, "RepaymentsOfLongTermDebt", CF, S::FinancingActivities, "Repayments of Long-Term Debt", 40),
    // Stockholders' Equity
    def(GAAP, "StockIssuedDuringPeriodValueNewIssues", EQ, S::EquityComponents, "Stock Issued", 10),
    def(GAAP, "StockIssuedDuringPeriodValueShareBasedCompensation", EQ, S::EquityComponents, "Stock Issued for Compensation", 15),
    def(GAAP, "StockRepurchasedDuringPeriodValue", EQ, S::EquityComponents, "Stock Repurchased", 20),
    def(GAAP, "StockRepurchasedAndRetiredDuringPeriodValue", EQ, S::EquityComponents, "Stock Repurchased and Retired", 25),
    def(GAAP, "AdjustmentsToAdditionalPaidInCapitalSharebasedCompensationRequisiteServicePeriodRecognitionValue", EQ, S::EquityComponents, "Share-Based Compensation (APIC)", 30),
    def(GAAP, "DividendsCommonStock", EQ, S::EquityComponents, "Dividends Declared", 40),
    def(GAAP, "DividendsCommonStockCash", EQ, S::EquityComponents, "Cash Dividends Declared", 45),
    def(GAAP, "CommonStockDividendsPerShareDeclared", EQ, S::EquityComponents, "Dividends per Share Declared", 50),
    // Comprehensive Income
    def(GAAP, "ComprehensiveIncomeNetOfTax", CI, S::ComprehensiveIncome, "Comprehensive Income", 0),
    def(GAAP, "ComprehensiveIncomeNetOfTaxIncludingPortionAttributableToNoncontrollingInterest", CI, S::ComprehensiveIncome, "Comprehensive Income incl. Noncontrolling Interest", 5),
    def(GAAP, "OtherComprehensiveIncomeLossNetOfTax", CI, S::ComprehensiveIncome, "Other Comprehensive Income", 10),
    def(GAAP, "OtherComprehensiveIncomeLossForeignCurrencyTransactionAndTranslationAdjustmentNetOfTax", CI, S::ComprehensiveIncome, "Foreign Currency Translation", 20),
    def(GAAP, "OtherComprehensiveIncomeUnrealizedHoldingGainLossOnSecuritiesArisingDuringPeriodNetOfTax", CI, S::ComprehensiveIncome, "Unrealized Gains on Securities", 30),
    // IFRS filers (20-F)
    def(IFRS, "Assets", BS, S::Assets, "Total Assets", 0),
    def(IFRS, "CurrentAssets", BS, S::Assets, "Current Assets", 10),
    def(IFRS, "CashAndCashEquivalents", BS, S::Assets, "Cash and Cash Equivalents", 20),
    def(IFRS, "NoncurrentAssets", BS, S::Assets, "Non-Current Assets", 100),
    def(IFRS, "Liabilities", BS, S::Liabilities, "Total Liabilities", 0),
    def(IFRS, "CurrentLiabilities", BS, S::Liabilities, "Current Liabilities", 10),
    def(IFRS, "NoncurrentLiabilities", BS, S::Liabilities, "Non-Current Liabilities", 100),
    def(IFRS, "Equity", BS, S::Equity, "Total Equity", 0),
    def(IFRS, "RetainedEarnings", BS, S::Equity, "Retained Earnings", 20),
    def(IFRS, "Revenue", IS, S::Revenue, "Total Revenue", 0),
    def(IFRS, "GrossProfit", IS, S::Revenue, "Gross Profit", 20),
    def(IFRS, "CostOfSales", IS, S::Revenue, "Cost of Sales", 25),
    def(IFRS, "ProfitLossFromOperatingActivities", IS, S::Income, "Operating Income", 45),
    def(IFRS, "ProfitLossBeforeTax", IS, S::Income, "Income Before Income Taxes", 52),
    def(IFRS, "IncomeTaxExpenseContinuingOperations", IS, S::Income, "Income Tax Expense", 55),
    def(IFRS, "ProfitLoss", IS, S::Income, "Net Income", 60),
    def(IFRS, "BasicEarningsLossPerShare", IS, S::Eps, "EPS (Basic)", 0),
    def(IFRS, "DilutedEarningsLossPerShare", IS, S::Eps, "EPS (Diluted)", 10),
    def(IFRS, "CashFlowsFromUsedInOperatingActivities", CF, S::OperatingActivities, "Net Cash from Operations", 0),
    def(IFRS, "CashFlowsFromUsedInInvestingActivities", CF, S::InvestingActivities, "Net Cash from Investing", 0),
    def(IFRS, "CashFlowsFromUsedInFinancingActivities", CF, S::FinancingActivities, "Net Cash from Financing", 0),
    def(IFRS, "OtherComprehensiveIncome", CI, S::ComprehensiveIncome, "Other Comprehensive Income", 10),
    def(IFRS, "ComprehensiveIncome", CI, S::ComprehensiveIncome, "Comprehensive Income", 0),
];

/// Look up a concept by taxonomy and tag.
#[must_use]
pub fn lookup(taxonomy: &str, tag: &str) -> Option<&'static ConceptDefinition> {
    CONCEPTS
        .iter()
        .find(|c| c.tag == tag && c.taxonomy == taxonomy)
}

/// Classify a fact, or `None` if its concept is not presented on any statement.
#[must_use]
pub fn classify(fact: &ConceptFact) -> Option<&'static ConceptDefinition> {
    lookup(&fact.taxonomy, &fact.tag)
}

/// Turn a CamelCase tag into words: `AccountsPayableCurrent` becomes
/// `Accounts Payable Current`, `EBITDAMargin` becomes `EBITDA Margin`.
#[must_use]
pub fn humanize_tag(tag: &str) -> String {
    let chars: Vec<char> = tag.chars().collect();
    let mut out = String::with_capacity(tag.len() + 8);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(char::is_ascii_lowercase);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push(' ');
            }
        }
        out.push(c);
    }

    out
}
