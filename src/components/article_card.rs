use yew::prelude::*;

use crate::models::ArticleSummary;

#[derive(Properties, PartialEq)]
pub struct ArticleCardProps {
    pub article: ArticleSummary,
}

#[function_component(ArticleCard)]
pub fn article_card(props: &ArticleCardProps) -> Html {
    let article = &props.article;
    let author_initial = article
        .author
        .name
        .chars()
        .next()
        .unwrap_or('?')
        .to_uppercase()
        .to_string();

    html! {
        <article class="bg-white dark:bg-gray-800 rounded-xl shadow-sm overflow-hidden">
            if let Some(image) = article.image.clone() {
                <img class="w-full h-48 object-cover" src={image} alt={article.title.clone()}/>
            }
            <div class="p-6">
                <div class="flex items-center justify-between mb-3">
                    <div class="flex items-center space-x-2 space-x-reverse">
                        {
                            match article.author.avatar.clone() {
                                Some(avatar) => html! {
                                    <img class="w-8 h-8 rounded-full" src={avatar} alt={article.author.name.clone()}/>
                                },
                                None => html! {
                                    <div class="w-8 h-8 rounded-full bg-blue-500 text-white flex items-center justify-center text-sm">
                                        {author_initial}
                                    </div>
                                },
                            }
                        }
                        <span class="text-sm text-gray-700 dark:text-gray-300">{article.author.name.clone()}</span>
                    </div>
                    if article.featured {
                        <span class="bg-yellow-100 text-yellow-800 text-xs px-2 py-1 rounded-full">{"ویژه"}</span>
                    }
                </div>
                <h2 class="text-xl font-bold text-gray-900 dark:text-white mb-2">{article.title.clone()}</h2>
                <p class="text-gray-600 dark:text-gray-400 mb-4">{article.excerpt.clone()}</p>
                <div class="flex flex-wrap gap-2 mb-4">
                    { for article.tags.iter().map(|tag| html! {
                        <span class="bg-gray-100 dark:bg-gray-700 text-gray-600 dark:text-gray-400 text-xs px-2 py-1 rounded-full">
                            {format!("#{tag}")}
                        </span>
                    }) }
                </div>
                <div class="flex items-center justify-between text-sm text-gray-500 dark:text-gray-400">
                    <div class="flex items-center space-x-4 space-x-reverse">
                        <span title="likes">{format!("♥ {}", article.stats.likes)}</span>
                        <span title="comments">{format!("💬 {}", article.stats.comments)}</span>
                        <span title="views">{format!("👁 {}", article.stats.views)}</span>
                    </div>
                    if let Some(published_at) = article.published_at.clone() {
                        <span>{published_at.split('T').next().unwrap_or_default().to_string()}</span>
                    }
                </div>
            </div>
        </article>
    }
}
