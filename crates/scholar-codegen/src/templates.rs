//! Python script templates
//!
//! Fixed analysis scripts with `__NAME__` placeholders substituted at
//! generation time. Placeholder substitution keeps the Python braces out of
//! Rust format strings.

use chrono::Utc;

use crate::kinds::AnalysisKind;

/// Render the template for one analysis kind
pub fn render(
    kind: AnalysisKind,
    data_path: &str,
    hypotheses: &[String],
    step: &str,
    project_id: &str,
) -> String {
    let template = match kind {
        AnalysisKind::Eda => EDA_TEMPLATE,
        AnalysisKind::Correlation => CORRELATION_TEMPLATE,
        AnalysisKind::Regression => REGRESSION_TEMPLATE,
        AnalysisKind::TTest => TTEST_TEMPLATE,
        AnalysisKind::Anova => ANOVA_TEMPLATE,
        AnalysisKind::ChiSquare => CHISQUARE_TEMPLATE,
        AnalysisKind::Custom => CUSTOM_TEMPLATE,
    };

    template
        .replace("__DATA_PATH__", data_path)
        .replace("__PROJECT_ID__", project_id)
        .replace("__ANALYSIS_TYPE__", step)
        .replace("__TIMESTAMP__", &Utc::now().to_rfc3339())
        .replace("__HYPOTHESES__", &hypothesis_prints(hypotheses))
}

/// One Python `print` per hypothesis, numbered, quotes escaped
fn hypothesis_prints(hypotheses: &[String]) -> String {
    hypotheses
        .iter()
        .enumerate()
        .map(|(i, h)| format!("print(\"{}. {}\")", i + 1, h.replace('"', "\\\"")))
        .collect::<Vec<_>>()
        .join("\n")
}

const EDA_TEMPLATE: &str = r##"#!/usr/bin/env python3
"""
Exploratory Data Analysis Script
Project: __PROJECT_ID__
Generated: __TIMESTAMP__
"""

import pandas as pd
import numpy as np
import matplotlib.pyplot as plt
import seaborn as sns
from scipy import stats
import warnings
warnings.filterwarnings('ignore')

sns.set_style("whitegrid")
plt.rcParams['figure.figsize'] = (12, 8)

print("="*60)
print("EXPLORATORY DATA ANALYSIS")
print("="*60)

print("\nLoading data from: __DATA_PATH__")
try:
    df = pd.read_csv("__DATA_PATH__")
    print(f"Data loaded successfully: {df.shape[0]} rows, {df.shape[1]} columns")
except Exception as e:
    print(f"Error loading data: {e}")
    exit(1)

print("\n" + "="*60)
print("DATA STRUCTURE")
print("="*60)
print(df.info())

print("\n" + "="*60)
print("DESCRIPTIVE STATISTICS")
print("="*60)
print(df.describe(include='all'))

print("\n" + "="*60)
print("MISSING VALUES ANALYSIS")
print("="*60)
missing = df.isnull().sum()
missing_pct = (missing / len(df)) * 100
missing_df = pd.DataFrame({
    'Missing Count': missing,
    'Percentage': missing_pct
})
print(missing_df[missing_df['Missing Count'] > 0])

numeric_cols = df.select_dtypes(include=[np.number]).columns.tolist()
if numeric_cols:
    print("\n" + "="*60)
    print("NUMERIC VARIABLES DISTRIBUTION")
    print("="*60)
    for col in numeric_cols:
        print(f"\n{col}:")
        print(f"  Mean: {df[col].mean():.2f}")
        print(f"  Median: {df[col].median():.2f}")
        print(f"  Std Dev: {df[col].std():.2f}")
        print(f"  Min: {df[col].min():.2f}")
        print(f"  Max: {df[col].max():.2f}")
        print(f"  Skewness: {df[col].skew():.2f}")
        print(f"  Kurtosis: {df[col].kurtosis():.2f}")
        Q1 = df[col].quantile(0.25)
        Q3 = df[col].quantile(0.75)
        IQR = Q3 - Q1
        outliers = df[(df[col] < Q1 - 1.5*IQR) | (df[col] > Q3 + 1.5*IQR)]
        print(f"  Outliers (IQR method): {len(outliers)} ({len(outliers)/len(df)*100:.1f}%)")

categorical_cols = df.select_dtypes(include=['object']).columns.tolist()
if categorical_cols:
    print("\n" + "="*60)
    print("CATEGORICAL VARIABLES DISTRIBUTION")
    print("="*60)
    for col in categorical_cols:
        print(f"\n{col}:")
        print(df[col].value_counts())
        print(f"  Unique values: {df[col].nunique()}")

if len(numeric_cols) > 1:
    print("\n" + "="*60)
    print("CORRELATION MATRIX")
    print("="*60)
    correlation_matrix = df[numeric_cols].corr()
    print(correlation_matrix)

    plt.figure(figsize=(10, 8))
    sns.heatmap(correlation_matrix, annot=True, cmap='coolwarm', center=0,
                square=True, linewidths=1, cbar_kws={"shrink": 0.8})
    plt.title('Correlation Heatmap')
    plt.tight_layout()
    plt.savefig('__PROJECT_ID___correlation_heatmap.png', dpi=300, bbox_inches='tight')
    print("\nCorrelation heatmap saved to: __PROJECT_ID___correlation_heatmap.png")

if numeric_cols:
    n_cols = min(3, len(numeric_cols))
    n_rows = (len(numeric_cols) + n_cols - 1) // n_cols
    fig, axes = plt.subplots(n_rows, n_cols, figsize=(15, 5*n_rows))
    axes = axes.flatten() if len(numeric_cols) > 1 else [axes]
    for idx, col in enumerate(numeric_cols):
        axes[idx].hist(df[col].dropna(), bins=30, edgecolor='black', alpha=0.7)
        axes[idx].set_title(f'Distribution of {col}')
        axes[idx].set_xlabel(col)
        axes[idx].set_ylabel('Frequency')
    for idx in range(len(numeric_cols), len(axes)):
        axes[idx].set_visible(False)
    plt.tight_layout()
    plt.savefig('__PROJECT_ID___distributions.png', dpi=300, bbox_inches='tight')
    print("Distribution plots saved to: __PROJECT_ID___distributions.png")

print("\n" + "="*60)
print("EDA COMPLETE")
print("="*60)
print("\nHypotheses to be tested:")
__HYPOTHESES__
"##;

const CORRELATION_TEMPLATE: &str = r##"#!/usr/bin/env python3
"""
Correlation Analysis Script
Project: __PROJECT_ID__
"""

import pandas as pd
import numpy as np
from scipy import stats
import matplotlib.pyplot as plt
import seaborn as sns

print("="*60)
print("CORRELATION ANALYSIS")
print("="*60)

df = pd.read_csv("__DATA_PATH__")
print(f"\nData loaded: {df.shape[0]} rows, {df.shape[1]} columns")

numeric_cols = df.select_dtypes(include=[np.number]).columns.tolist()
print(f"\nNumeric columns for correlation analysis: {', '.join(numeric_cols)}")

if len(numeric_cols) < 2:
    print("\nError: Need at least 2 numeric columns for correlation analysis")
    exit(1)

print("\n" + "="*60)
print("PEARSON CORRELATION (parametric)")
print("="*60)
for i in range(len(numeric_cols)):
    for j in range(i+1, len(numeric_cols)):
        col1, col2 = numeric_cols[i], numeric_cols[j]
        r, p = stats.pearsonr(df[col1].dropna(), df[col2].dropna())
        sig = "***" if p < 0.001 else "**" if p < 0.01 else "*" if p < 0.05 else "ns"
        print(f"{col1} <-> {col2}: r = {r:.3f}, p = {p:.4f} {sig}")

print("\n" + "="*60)
print("SPEARMAN CORRELATION (non-parametric)")
print("="*60)
for i in range(len(numeric_cols)):
    for j in range(i+1, len(numeric_cols)):
        col1, col2 = numeric_cols[i], numeric_cols[j]
        rho, p = stats.spearmanr(df[col1].dropna(), df[col2].dropna())
        sig = "***" if p < 0.001 else "**" if p < 0.01 else "*" if p < 0.05 else "ns"
        print(f"{col1} <-> {col2}: rho = {rho:.3f}, p = {p:.4f} {sig}")

print("\n" + "="*60)
print("GENERATING SCATTER PLOTS")
print("="*60)

n_pairs = len(numeric_cols) * (len(numeric_cols) - 1) // 2
n_cols = min(3, n_pairs)
n_rows = (n_pairs + n_cols - 1) // n_cols

fig, axes = plt.subplots(n_rows, n_cols, figsize=(15, 5*n_rows))
axes = axes.flatten() if n_pairs > 1 else [axes]

plot_idx = 0
for i in range(len(numeric_cols)):
    for j in range(i+1, len(numeric_cols)):
        col1, col2 = numeric_cols[i], numeric_cols[j]
        r, p = stats.pearsonr(df[col1].dropna(), df[col2].dropna())
        axes[plot_idx].scatter(df[col1], df[col2], alpha=0.5)
        axes[plot_idx].set_xlabel(col1)
        axes[plot_idx].set_ylabel(col2)
        axes[plot_idx].set_title(f'{col1} vs {col2}\nr = {r:.3f}, p = {p:.4f}')
        z = np.polyfit(df[col1].dropna(), df[col2].dropna(), 1)
        p_line = np.poly1d(z)
        axes[plot_idx].plot(df[col1], p_line(df[col1]), "r--", alpha=0.8)
        plot_idx += 1

plt.tight_layout()
plt.savefig('__PROJECT_ID___scatter_plots.png', dpi=300, bbox_inches='tight')
print("\nScatter plots saved to: __PROJECT_ID___scatter_plots.png")

print("\n" + "="*60)
print("CORRELATION ANALYSIS COMPLETE")
print("="*60)
"##;

const REGRESSION_TEMPLATE: &str = r##"#!/usr/bin/env python3
"""
Regression Analysis Script
Project: __PROJECT_ID__
"""

import pandas as pd
import numpy as np
import statsmodels.api as sm
import statsmodels.formula.api as smf
from scipy import stats
import matplotlib.pyplot as plt

print("="*60)
print("REGRESSION ANALYSIS")
print("="*60)

df = pd.read_csv("__DATA_PATH__")
print(f"\nData loaded: {df.shape[0]} rows, {df.shape[1]} columns")

numeric_cols = df.select_dtypes(include=[np.number]).columns.tolist()
print(f"\nNumeric columns: {', '.join(numeric_cols)}")

if len(numeric_cols) < 2:
    print("\nError: Need at least 2 numeric columns for regression")
    exit(1)

# First numeric column as dependent variable, rest as predictors
dependent_var = numeric_cols[0]
independent_vars = numeric_cols[1:]

print(f"\nDependent variable: {dependent_var}")
print(f"Independent variables: {', '.join(independent_vars)}")

formula = f"{dependent_var} ~ {' + '.join(independent_vars)}"
print(f"\nRegression formula: {formula}")

print("\n" + "="*60)
print("MODEL FITTING")
print("="*60)

try:
    model = smf.ols(formula=formula, data=df).fit()
    print(model.summary())

    print("\n" + "="*60)
    print("MODEL DIAGNOSTICS")
    print("="*60)
    print(f"\nR-squared: {model.rsquared:.4f}")
    print(f"Adjusted R-squared: {model.rsquared_adj:.4f}")
    print(f"F-statistic: {model.fvalue:.4f}, p-value: {model.f_pvalue:.4e}")

    residuals = model.resid
    fitted = model.fittedvalues

    _, p_normality = stats.shapiro(residuals)
    print(f"\nShapiro-Wilk test for normality: p = {p_normality:.4f}")

    from statsmodels.stats.diagnostic import het_breuschpagan
    _, p_hetero, _, _ = het_breuschpagan(residuals, model.model.exog)
    print(f"Breusch-Pagan test for homoscedasticity: p = {p_hetero:.4f}")

    fig, axes = plt.subplots(2, 2, figsize=(12, 10))
    axes[0, 0].scatter(fitted, residuals, alpha=0.5)
    axes[0, 0].axhline(y=0, color='r', linestyle='--')
    axes[0, 0].set_title('Residuals vs Fitted')
    stats.probplot(residuals, dist="norm", plot=axes[0, 1])
    axes[0, 1].set_title('Normal Q-Q Plot')
    standardized_resid = np.sqrt(np.abs(residuals / residuals.std()))
    axes[1, 0].scatter(fitted, standardized_resid, alpha=0.5)
    axes[1, 0].set_title('Scale-Location Plot')
    axes[1, 1].hist(residuals, bins=30, edgecolor='black', alpha=0.7)
    axes[1, 1].set_title('Histogram of Residuals')
    plt.tight_layout()
    plt.savefig('__PROJECT_ID___regression_diagnostics.png', dpi=300, bbox_inches='tight')
    print("\nDiagnostic plots saved to: __PROJECT_ID___regression_diagnostics.png")

    results_df = pd.DataFrame({
        'Fitted': fitted,
        'Residuals': residuals,
        'Actual': df[dependent_var]
    })
    results_df.to_csv('__PROJECT_ID___regression_results.csv', index=False)
    print("Results saved to: __PROJECT_ID___regression_results.csv")

except Exception as e:
    print(f"\nError fitting regression model: {e}")
    print("\nPlease check:")
    print("  - All variables are numeric")
    print("  - No missing values in the data")
    print("  - Variable names match column names in the dataset")

print("\n" + "="*60)
print("REGRESSION ANALYSIS COMPLETE")
print("="*60)
"##;

const TTEST_TEMPLATE: &str = r##"#!/usr/bin/env python3
"""
T-Test Analysis Script
Project: __PROJECT_ID__
"""

import pandas as pd
import numpy as np
from scipy import stats

print("="*60)
print("T-TEST ANALYSIS")
print("="*60)

df = pd.read_csv("__DATA_PATH__")
print(f"\nData loaded: {df.shape[0]} rows, {df.shape[1]} columns")

numeric_cols = df.select_dtypes(include=[np.number]).columns.tolist()
categorical_cols = df.select_dtypes(include=['object']).columns.tolist()

print(f"\nNumeric columns: {', '.join(numeric_cols)}")
print(f"Categorical columns: {', '.join(categorical_cols)}")

for cat_col in categorical_cols:
    unique_values = df[cat_col].unique()

    if len(unique_values) == 2:
        print(f"\n{'='*60}")
        print(f"T-TESTS FOR: {cat_col}")
        print(f"Groups: {unique_values[0]} vs {unique_values[1]}")
        print(f"{'='*60}")

        group1 = df[df[cat_col] == unique_values[0]]
        group2 = df[df[cat_col] == unique_values[1]]

        for num_col in numeric_cols:
            data1 = group1[num_col].dropna()
            data2 = group2[num_col].dropna()

            if len(data1) > 0 and len(data2) > 0:
                t_stat, p_value = stats.ttest_ind(data1, data2)
                pooled_std = np.sqrt(((len(data1)-1)*data1.std()**2 + (len(data2)-1)*data2.std()**2) / (len(data1)+len(data2)-2))
                cohens_d = (data1.mean() - data2.mean()) / pooled_std

                print(f"\n{num_col}:")
                print(f"  {unique_values[0]}: M = {data1.mean():.2f}, SD = {data1.std():.2f}, N = {len(data1)}")
                print(f"  {unique_values[1]}: M = {data2.mean():.2f}, SD = {data2.std():.2f}, N = {len(data2)}")
                print(f"  t({len(data1)+len(data2)-2}) = {t_stat:.3f}, p = {p_value:.4f}")
                print(f"  Cohen's d = {cohens_d:.3f}")

                if p_value < 0.001:
                    print("  *** Highly significant difference")
                elif p_value < 0.01:
                    print("  ** Significant difference")
                elif p_value < 0.05:
                    print("  * Significant difference")
                else:
                    print("  ns (not significant)")

print("\n" + "="*60)
print("T-TEST ANALYSIS COMPLETE")
print("="*60)
"##;

const ANOVA_TEMPLATE: &str = r##"#!/usr/bin/env python3
"""
ANOVA Analysis Script
Project: __PROJECT_ID__
"""

import pandas as pd
import numpy as np
from scipy import stats

print("="*60)
print("ANOVA ANALYSIS")
print("="*60)

df = pd.read_csv("__DATA_PATH__")
print(f"\nData loaded: {df.shape[0]} rows, {df.shape[1]} columns")

numeric_cols = df.select_dtypes(include=[np.number]).columns.tolist()
categorical_cols = df.select_dtypes(include=['object']).columns.tolist()

for cat_col in categorical_cols:
    unique_values = df[cat_col].unique()

    if len(unique_values) >= 3:
        print(f"\n{'='*60}")
        print(f"ONE-WAY ANOVA FOR: {cat_col}")
        print(f"Groups: {', '.join(map(str, unique_values))}")
        print(f"{'='*60}")

        for num_col in numeric_cols:
            groups = [df[df[cat_col] == val][num_col].dropna() for val in unique_values]

            if all(len(g) > 0 for g in groups):
                f_stat, p_value = stats.f_oneway(*groups)

                print(f"\n{num_col}:")
                for i, val in enumerate(unique_values):
                    print(f"  {val}: M = {groups[i].mean():.2f}, SD = {groups[i].std():.2f}, N = {len(groups[i])}")
                print(f"  F({len(groups)-1}, {sum(len(g) for g in groups)-len(groups)}) = {f_stat:.3f}, p = {p_value:.4f}")

                if p_value < 0.05:
                    print("  * Significant difference between groups")
                else:
                    print("  ns (not significant)")

print("\n" + "="*60)
print("ANOVA ANALYSIS COMPLETE")
print("="*60)
"##;

const CHISQUARE_TEMPLATE: &str = r##"#!/usr/bin/env python3
"""
Chi-Square Test Script
Project: __PROJECT_ID__
"""

import pandas as pd
import numpy as np
from scipy import stats

print("="*60)
print("CHI-SQUARE TEST ANALYSIS")
print("="*60)

df = pd.read_csv("__DATA_PATH__")
print(f"\nData loaded: {df.shape[0]} rows, {df.shape[1]} columns")

categorical_cols = df.select_dtypes(include=['object']).columns.tolist()

if len(categorical_cols) < 2:
    print("\nError: Need at least 2 categorical columns for chi-square test")
    exit(1)

for i in range(len(categorical_cols)):
    for j in range(i+1, len(categorical_cols)):
        col1, col2 = categorical_cols[i], categorical_cols[j]

        print(f"\n{'='*60}")
        print(f"CHI-SQUARE TEST: {col1} vs {col2}")
        print(f"{'='*60}")

        contingency_table = pd.crosstab(df[col1], df[col2])
        print("\nContingency Table:")
        print(contingency_table)

        chi2, p_value, dof, expected = stats.chi2_contingency(contingency_table)

        print(f"\nChi-square statistic: {chi2:.3f}")
        print(f"Degrees of freedom: {dof}")
        print(f"P-value: {p_value:.4f}")

        n = contingency_table.sum().sum()
        min_dim = min(contingency_table.shape[0], contingency_table.shape[1]) - 1
        cramers_v = np.sqrt(chi2 / (n * min_dim))
        print(f"Cramer's V: {cramers_v:.3f}")

        if p_value < 0.001:
            print("*** Highly significant association")
        elif p_value < 0.01:
            print("** Significant association")
        elif p_value < 0.05:
            print("* Significant association")
        else:
            print("ns (no significant association)")

print("\n" + "="*60)
print("CHI-SQUARE ANALYSIS COMPLETE")
print("="*60)
"##;

const CUSTOM_TEMPLATE: &str = r##"#!/usr/bin/env python3
"""
Custom Analysis Script: __ANALYSIS_TYPE__
Project: __PROJECT_ID__
"""

import pandas as pd
import numpy as np
from scipy import stats

print("="*60)
print("CUSTOM ANALYSIS: __ANALYSIS_TYPE__")
print("="*60)

df = pd.read_csv("__DATA_PATH__")
print(f"\nData loaded: {df.shape[0]} rows, {df.shape[1]} columns")
print(f"\nColumns: {', '.join(df.columns)}")

# Hypotheses being tested:
__HYPOTHESES__

print("\n" + "="*60)
print("IMPLEMENT YOUR CUSTOM ANALYSIS HERE")
print("="*60)
print("\nThis is a template script for: __ANALYSIS_TYPE__")
print("Please customize the analysis based on your specific needs.")

print("\nData summary:")
print(df.describe())

print("\n" + "="*60)
print("CUSTOM ANALYSIS COMPLETE")
print("="*60)
"##;
