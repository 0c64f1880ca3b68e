//! Prompt assembly (§4.5): the direct-answer and retrieval-grounded prompt
//! templates, including the "house rules" that keep the model from echoing
//! internal weights, over-citing comments, or fabricating operational facts.

use chrono::NaiveDate;
use concierge_core::models::{CategorySummary, PreviousTurn, RankedCandidate, SubQuery};

const HOTEL_NAME: &str = "广州花园酒店";

fn history_block(history: Option<&PreviousTurn>) -> String {
    match history {
        Some(turn) => format!(
            "\n【上一轮对话】\n用户：{}\n助手：{}\n",
            turn.user, turn.assistant
        ),
        None => String::new(),
    }
}

/// The DIRECT-branch prompt (§4.2): no retrieval context at all.
pub fn build_direct_prompt(user_query: &str, history: Option<&PreviousTurn>) -> String {
    format!(
        "你是{HOTEL_NAME}的智能客服助手。\n\
         {history}\n\
         用户问题：{user_query}\n\n\
         请直接回答用户的问题。注意：\n\
         - 如果是问候或闲聊，友好回应\n\
         - 如果是通用问题，给出简洁准确的回答\n\
         - 如果用户的问题是对上一轮对话的追问，请结合上下文理解用户意图\n\
         - 语气要亲切专业\n\
         - 使用Markdown格式输出，不得出现 \"```markdown\", \"```\" 标记",
        history = history_block(history),
    )
}

fn queries_block(sub_queries: Option<&[SubQuery]>) -> String {
    let Some(sub_queries) = sub_queries.filter(|q| !q.is_empty()) else {
        return String::new();
    };
    let lines: Vec<String> = sub_queries
        .iter()
        .map(|q| format!("- {}（意图权重为{}）", q.text, q.weight))
        .collect();
    format!(
        "【问题解析】\n系统识别到用户可能关注以下方面：\n{}\n\
         注意：权重信息是用来帮助你区分意图主次的，**不得**向用户输出权重相关信息。",
        lines.join("\n")
    )
}

fn comments_block(ranked_comments: Option<&[RankedCandidate]>) -> String {
    let Some(comments) = ranked_comments.filter(|c| !c.is_empty()) else {
        return "【未检索到相关用户评论】\n".to_string();
    };
    let mut block = String::from("【相关用户评论】\n");
    for (i, c) in comments.iter().enumerate() {
        let room_type = c.candidate.metadata.room_type.as_deref().unwrap_or("未知");
        block.push_str(&format!(
            "\n【评论{n}】\n评分: {score}（满分5分）\n发布日期: {date}\n评论文本: {text}\n点赞数: {useful}\n回复数: {review}\n房型: {room_type}\n",
            n = i + 1,
            score = c.candidate.metadata.score,
            date = c.candidate.metadata.publish_date,
            text = c.candidate.comment,
            useful = c.candidate.metadata.useful_count,
            review = c.candidate.metadata.review_count,
        ));
    }
    block
}

fn summaries_block(summaries: Option<&[CategorySummary]>) -> String {
    let Some(summaries) = summaries.filter(|s| !s.is_empty()) else {
        return String::new();
    };
    let mut block = String::from("【相关评论摘要】\n");
    for s in summaries {
        block.push_str(&format!(
            "\n【{category}类别摘要】\n关键词: {keywords}\n摘要: {summary}\n",
            category = s.category,
            keywords = s.keywords,
            summary = s.summary,
        ));
    }
    block.push_str(
        "\n注意：评论摘要是用来给到你更丰富的概览信息的，但用户只能看到【相关用户评论】的引用而看不到摘要的引用，\
         因此在回复中你可以给出摘要中的模糊信息，但**不得过于精确因为用户无法溯源**，也**不得告诉用户你引用了摘要**，\
         **更不得将其当作评论引用输出\"评论x\"**。若摘要中的信息与用户问题无关，直接忽略即可，**不需要**做出任何额外说明。\n",
    );
    block
}

const HOUSE_RULES: &str = "\
【回答要求】
1. 综合以上评论信息，给出客观、全面的回答
2. 回答要有条理，突出重点
3. 如有正面和负面评价，都要提及，保持客观。注意给出的参考评论并不代表所有，切忌以偏概全给出\"绝对化\"的表述
4. 语气要专业、亲切
5. 回答长度适中，不要过于冗长
6. 不得大段或连续照抄用户评论，严禁全文都在引用用户评论却并没有思考提炼总结。相似内容能合并就合并，不要分开引用（合并后注意不得同时列出超过3条参考评论，使用\"等\"替代）
7. 一般来说越靠前的评论，其重要性越高，但你也可以自行判断自行选择
8. 不得在回复中罗列用户评论的具体日期，但当用户问题时效性敏感时，可以大致提一下参考评论的时间范围；当用户未表现出明显时效性需求时不要强行给出具体时间
9. 引用【相关用户评论】中某一条评论独特内容时应指出其序号评论几（**仅指出非常确定的引用，模棱两可的引用不要指出，务必保证引用序号绝对正确**），供用户参考；但针对参考评论总体或摘要进行归纳总结时**无需**指出参考了哪些评论
10. 不得同时列出超过3条参考评论。如需同时引用超过3条评论，则应输出\"（评论1/3等）\"，而不是将其全部列出。优先给出排名靠前的评论引用
11. 如果评论信息不足以回答问题，诚实说明
12. 所有的回复必须仅依赖检索到的用户评论及摘要，不得出现自作主张的幻觉回复，例如帮用户查询酒店今日客房剩余、当前酒店相关活动推荐等一律不允许出现。你并没有接入酒店内部API无法完成这些事情因此禁止在回复中出现此类幻觉信息
13. 使用Markdown格式输出，不得出现 \"```markdown\", \"```\" 标记";

/// The retrieval-grounded prompt (§4.5). `today` drives the displayed date
/// and is caller-supplied so tests and replays stay deterministic.
pub fn build_retrieval_prompt(
    user_query: &str,
    sub_queries: Option<&[SubQuery]>,
    ranked_comments: Option<&[RankedCandidate]>,
    summaries: Option<&[CategorySummary]>,
    history: Option<&PreviousTurn>,
    today: NaiveDate,
) -> String {
    format!(
        "你是{HOTEL_NAME}的智能客服助手，需要基于用户评论为用户提供准确、高质量、有帮助、简洁的回答。\n\n\
         今天是：{date}\n\
         {history}\n\
         用户问题：{user_query}\n\n\
         {queries}\n\n\
         {comments}\n\n\
         {summaries}\n\n\
         {rules}\n\n\
         用户问题：{user_query}\n\n\
         请给出你的回答：",
        date = today.format("%Y年%m月%d日"),
        history = history_block(history),
        queries = queries_block(sub_queries),
        comments = comments_block(ranked_comments),
        summaries = summaries_block(summaries),
        rules = HOUSE_RULES,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_core::models::{Candidate, CandidateMetadata, FeatureScores};

    fn candidate(text: &str) -> RankedCandidate {
        RankedCandidate {
            candidate: Candidate {
                comment_id: "c1".to_string(),
                comment: text.to_string(),
                rrf_score: 0.1,
                rrf_rank: 1,
                route_ranks: Default::default(),
                metadata: CandidateMetadata {
                    score: 4.5,
                    publish_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    quality_score: 8.0,
                    review_count: 5,
                    useful_count: 2,
                    room_type: Some("大床房".to_string()),
                    fuzzy_room_type: None,
                },
            },
            rerank_score: 0.8,
            rerank_rank: 1,
            final_score: 0.7,
            final_rank: 1,
            feature_scores: FeatureScores {
                relevance: 0.8,
                quality: 0.8,
                log_comment_len: 0.3,
                log_review_count: 0.2,
                log_useful_count: 0.1,
                recency: 0.9,
            },
        }
    }

    #[test]
    fn direct_prompt_never_mentions_comments_section() {
        let prompt = build_direct_prompt("你好", None);
        assert!(!prompt.contains("相关用户评论"));
        assert!(prompt.contains("你好"));
    }

    #[test]
    fn retrieval_prompt_includes_numbered_comment_and_house_rules() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 30).unwrap();
        let comments = vec![candidate("早餐很好")];
        let prompt = build_retrieval_prompt("早餐怎么样", None, Some(&comments), None, None, today);
        assert!(prompt.contains("【评论1】"));
        assert!(prompt.contains("不得同时列出超过3条参考评论"));
        assert!(prompt.contains("2026年07月30日"));
    }

    #[test]
    fn missing_comments_uses_the_empty_placeholder() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 30).unwrap();
        let prompt = build_retrieval_prompt("早餐怎么样", None, None, None, None, today);
        assert!(prompt.contains("未检索到相关用户评论"));
    }

    #[test]
    fn expansion_weights_are_disclosed_to_the_model_but_flagged_as_internal() {
        let today = NaiveDate::from_ymd_opt(2026, 7, 30).unwrap();
        let subs = vec![SubQuery::new("早餐质量", 0.6), SubQuery::new("早餐种类", 0.4)];
        let prompt = build_retrieval_prompt("早餐怎么样", Some(&subs), None, None, None, today);
        assert!(prompt.contains("意图权重为0.6"));
        assert!(prompt.contains("不得**向用户输出权重相关信息"));
    }
}
