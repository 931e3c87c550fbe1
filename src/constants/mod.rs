pub mod judge_prompt;
